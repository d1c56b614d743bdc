//! Roster parsing.
//!
//! Turns free-form text (one name per line) into an ordered list of entrants.
//! Parsing never fails: any text, including the empty string, yields a valid
//! roster. An empty roster is a deliberate "clear the list" signal.

use super::entrant::Entrant;

/// U+FEFF, left at the start of text exported by some editors.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parses raw text into an ordered, uniquely-identified roster.
///
/// Lines are split on `\n` (a trailing `\r` is removed by trimming), trimmed
/// of whitespace and byte-order marks, and blank lines are discarded. Ids are assigned from the position in the
/// filtered sequence. Names are not deduplicated.
///
/// # Examples
///
/// ```
/// use whosnext::domain::parse_roster;
///
/// let roster = parse_roster("Ann\r\n\n  Bob  \nAnn\n");
/// let ids: Vec<&str> = roster.iter().map(|e| e.id.as_str()).collect();
/// let names: Vec<&str> = roster.iter().map(|e| e.name.as_str()).collect();
///
/// assert_eq!(ids, ["01", "02", "03"]);
/// assert_eq!(names, ["Ann", "Bob", "Ann"]);
/// ```
#[must_use]
pub fn parse_roster(raw_text: &str) -> Vec<Entrant> {
    let roster: Vec<Entrant> = raw_text
        .split('\n')
        .map(trim_line)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, name)| Entrant::at_position(index + 1, name))
        .collect();

    tracing::debug!(entrants = roster.len(), "roster parsed");
    roster
}

fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Renders a roster back to newline-joined names.
///
/// This is the text an editor is pre-filled with, so re-parsing it yields the
/// same roster.
#[must_use]
pub fn roster_text(roster: &[Entrant]) -> String {
    roster
        .iter()
        .map(|entrant| entrant.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(roster: &[Entrant]) -> Vec<&str> {
        roster.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn blank_and_whitespace_lines_are_dropped() {
        let roster = parse_roster("\n   \n\tAnn\t\n \r\n\r\nBob\n\n");
        assert_eq!(names(&roster), ["Ann", "Bob"]);
    }

    #[test]
    fn empty_text_yields_empty_roster() {
        assert!(parse_roster("").is_empty());
        assert!(parse_roster(" \n\t\r\n").is_empty());
    }

    #[test]
    fn duplicate_names_get_distinct_ids() {
        let roster = parse_roster("Sam\nSam\nSam");
        let ids: Vec<&str> = roster.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["01", "02", "03"]);
        assert_eq!(names(&roster), ["Sam", "Sam", "Sam"]);
    }

    #[test]
    fn ids_cover_exactly_one_to_n() {
        let text: String = (0..120).map(|i| format!("name {i}\n")).collect();
        let roster = parse_roster(&text);
        assert_eq!(roster.len(), 120);
        for (index, entrant) in roster.iter().enumerate() {
            assert_eq!(entrant.id, super::super::format_number(index + 1));
        }
        assert_eq!(roster[9].id, "10");
        assert_eq!(roster[119].id, "120");
    }

    #[test]
    fn interior_spaces_survive_trimming() {
        let roster = parse_roster("  Mary Ann Smith  ");
        assert_eq!(names(&roster), ["Mary Ann Smith"]);
    }

    #[test]
    fn roster_text_reparses_to_same_roster() {
        let roster = parse_roster("Ann\n\nBob\nCara");
        assert_eq!(roster_text(&roster), "Ann\nBob\nCara");
        assert_eq!(parse_roster(&roster_text(&roster)), roster);
    }

    #[test]
    fn byte_order_mark_is_not_part_of_a_name() {
        let roster = parse_roster("\u{feff}Ann\r\nBob\n\u{feff}\n");
        let names: Vec<&str> = roster.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Ann", "Bob"]);
    }
}
