//! Resolution of empty-base merge output.
//!
//! With an empty base every line on either side is an insertion, so a
//! conflict hunk with one empty side is a plain one-sided insertion and is
//! kept. Hunks with content on both sides are re-aligned line by line, and
//! a changed block that is framed by a repeated context line (usually a
//! closing `}`) is slid past it so hand-written and generated blocks land
//! on separate sides. Only regions where both sides still disagree are
//! written back with conflict markers.

use std::collections::VecDeque;

use similar::{Algorithm, DiffTag, capture_diff_slices};

const MINE_MARKER: &str = "<<<<<<<";
const SEPARATOR: &str = "=======";
const THEIRS_MARKER: &str = ">>>>>>>";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Equal(Vec<&'a str>),
    Change {
        mine: Vec<&'a str>,
        theirs: Vec<&'a str>,
    },
}

/// Merged text after resolving insertion-only hunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub text: String,
    /// Hunks that still carry conflict markers.
    pub conflicts: u32,
}

/// Resolves the conflict hunks in `merged`, relabelling the markers of the
/// hunks that remain.
pub(crate) fn resolve_insertions(merged: &str, mine_label: &str, theirs_label: &str) -> Resolution {
    let segments = slide(refine(parse(merged)));
    render(&segments, mine_label, theirs_label)
}

fn is_marker(line: &str, marker: &str) -> bool {
    line == marker
        || line
            .strip_prefix(marker)
            .is_some_and(|rest| rest.starts_with(' '))
}

fn push_equal<'a>(segments: &mut Vec<Segment<'a>>, lines: &[&'a str]) {
    if lines.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(Segment::Equal(equal)) => equal.extend_from_slice(lines),
        _ => segments.push(Segment::Equal(lines.to_vec())),
    }
}

fn push_change<'a>(segments: &mut Vec<Segment<'a>>, mine: &[&'a str], theirs: &[&'a str]) {
    if mine.is_empty() && theirs.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(Segment::Change {
            mine: prev_mine,
            theirs: prev_theirs,
        }) => {
            prev_mine.extend_from_slice(mine);
            prev_theirs.extend_from_slice(theirs);
        }
        _ => segments.push(Segment::Change {
            mine: mine.to_vec(),
            theirs: theirs.to_vec(),
        }),
    }
}

/// Splits merge output into resolved lines and conflict hunks.
fn parse(merged: &str) -> Vec<Segment<'_>> {
    #[derive(Clone, Copy)]
    enum State {
        Outside,
        Mine,
        Theirs,
    }

    let mut segments = Vec::new();
    let mut state = State::Outside;
    let mut mine = Vec::new();
    let mut theirs = Vec::new();

    for line in merged.lines() {
        match state {
            State::Outside if is_marker(line, MINE_MARKER) => state = State::Mine,
            State::Outside => push_equal(&mut segments, &[line]),
            State::Mine if line == SEPARATOR => state = State::Theirs,
            State::Mine => mine.push(line),
            State::Theirs if is_marker(line, THEIRS_MARKER) => {
                segments.push(Segment::Change {
                    mine: std::mem::take(&mut mine),
                    theirs: std::mem::take(&mut theirs),
                });
                state = State::Outside;
            }
            State::Theirs => theirs.push(line),
        }
    }

    // Unterminated hunk.
    if !mine.is_empty() || !theirs.is_empty() {
        segments.push(Segment::Change { mine, theirs });
    }
    segments
}

/// Re-diffs hunks with content on both sides, which the merge tool may
/// have coalesced across lines they share.
fn refine(segments: Vec<Segment<'_>>) -> Vec<Segment<'_>> {
    let mut refined = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Equal(lines) => push_equal(&mut refined, &lines),
            Segment::Change { mine, theirs } if mine.is_empty() || theirs.is_empty() => {
                push_change(&mut refined, &mine, &theirs);
            }
            Segment::Change { mine, theirs } => {
                for op in capture_diff_slices(Algorithm::Myers, &mine, &theirs) {
                    let (tag, old, new) = op.as_tag_tuple();
                    match tag {
                        DiffTag::Equal => push_equal(&mut refined, &mine[old]),
                        _ => push_change(&mut refined, &mine[old], &theirs[new]),
                    }
                }
            }
        }
    }
    refined
}

/// Separates the sides of a two-sided hunk by sliding one of them past an
/// adjacent context line it starts or ends with.
///
/// `P + M` equals `P' + (p + M') + p` when `M` ends with `P`'s last line
/// `p`, and `M + S` equals `s + (M'' + s) + S'` when `M` starts with `S`'s
/// first line `s`; the other side keeps its place relative to `p` / `s`.
fn slide(segments: Vec<Segment<'_>>) -> Vec<Segment<'_>> {
    let mut out: Vec<Segment<'_>> = Vec::with_capacity(segments.len());
    let mut rest: VecDeque<Segment<'_>> = segments.into();

    while let Some(segment) = rest.pop_front() {
        let (mine, theirs) = match segment {
            Segment::Change { mine, theirs } if !mine.is_empty() && !theirs.is_empty() => {
                (mine, theirs)
            }
            other => {
                out.push(other);
                continue;
            }
        };

        if let Some(Segment::Equal(next)) = rest.front_mut()
            && let Some(&first) = next.first()
        {
            if mine[0] == first {
                next.remove(0);
                let mut moved = mine[1..].to_vec();
                moved.push(first);
                out.push(Segment::Change { mine: Vec::new(), theirs });
                out.push(Segment::Equal(vec![first]));
                out.push(Segment::Change { mine: moved, theirs: Vec::new() });
                continue;
            }
            if theirs[0] == first {
                next.remove(0);
                let mut moved = theirs[1..].to_vec();
                moved.push(first);
                out.push(Segment::Change { mine, theirs: Vec::new() });
                out.push(Segment::Equal(vec![first]));
                out.push(Segment::Change { mine: Vec::new(), theirs: moved });
                continue;
            }
        }

        if let Some(Segment::Equal(prev)) = out.last_mut()
            && let Some(&last) = prev.last()
        {
            if mine.last() == Some(&last) {
                prev.pop();
                let mut moved = vec![last];
                moved.extend_from_slice(&mine[..mine.len() - 1]);
                out.push(Segment::Change { mine: moved, theirs: Vec::new() });
                out.push(Segment::Equal(vec![last]));
                out.push(Segment::Change { mine: Vec::new(), theirs });
                continue;
            }
            if theirs.last() == Some(&last) {
                prev.pop();
                let mut moved = vec![last];
                moved.extend_from_slice(&theirs[..theirs.len() - 1]);
                out.push(Segment::Change { mine: Vec::new(), theirs: moved });
                out.push(Segment::Equal(vec![last]));
                out.push(Segment::Change { mine, theirs: Vec::new() });
                continue;
            }
        }

        out.push(Segment::Change { mine, theirs });
    }

    out
}

fn push_lines(text: &mut String, lines: &[&str]) {
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
}

fn render(segments: &[Segment<'_>], mine_label: &str, theirs_label: &str) -> Resolution {
    let mut text = String::new();
    let mut conflicts = 0;

    for segment in segments {
        match segment {
            Segment::Equal(lines) => push_lines(&mut text, lines),
            Segment::Change { mine, theirs } if theirs.is_empty() => push_lines(&mut text, mine),
            Segment::Change { mine, theirs } if mine.is_empty() => push_lines(&mut text, theirs),
            Segment::Change { mine, theirs } => {
                conflicts += 1;
                text.push_str(&format!("{MINE_MARKER} {mine_label}\n"));
                push_lines(&mut text, mine);
                push_lines(&mut text, &[SEPARATOR]);
                push_lines(&mut text, theirs);
                text.push_str(&format!("{THEIRS_MARKER} {theirs_label}\n"));
            }
        }
    }

    Resolution { text, conflicts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(merged: &str) -> Resolution {
        resolve_insertions(merged, "existing", "generated")
    }

    #[test]
    fn test_one_sided_hunk_is_kept() {
        let merged = "type User {\n  id: ID!\n}\n<<<<<<< existing\n\ntype Viewer {\n  me: User!\n}\n=======\n>>>>>>> generated\n";
        let resolution = resolve(merged);
        assert_eq!(resolution.conflicts, 0);
        assert_eq!(
            resolution.text,
            "type User {\n  id: ID!\n}\n\ntype Viewer {\n  me: User!\n}\n"
        );
    }

    #[test]
    fn test_block_slides_past_closing_brace() {
        let merged = "type User {\n  id: ID!\n<<<<<<< existing\n}\n\ntype Viewer {\n  me: User!\n=======\n  email: String!\n>>>>>>> generated\n}\n";
        let resolution = resolve(merged);
        assert_eq!(resolution.conflicts, 0);
        assert_eq!(
            resolution.text,
            "type User {\n  id: ID!\n  email: String!\n}\n\ntype Viewer {\n  me: User!\n}\n"
        );
    }

    #[test]
    fn test_coalesced_hunk_is_realigned() {
        let merged = "<<<<<<< existing\ntype A {\n  a: Int\n}\n=======\ntype A {\n  a: Int\n  b: Int\n}\n>>>>>>> generated\n";
        let resolution = resolve(merged);
        assert_eq!(resolution.conflicts, 0);
        assert_eq!(resolution.text, "type A {\n  a: Int\n  b: Int\n}\n");
    }

    #[test]
    fn test_incompatible_edit_stays_conflicted() {
        let merged = "type User {\n<<<<<<< existing\n  id: String!\n=======\n  id: ID!\n>>>>>>> generated\n}\n";
        let resolution = resolve(merged);
        assert_eq!(resolution.conflicts, 1);
        assert_eq!(resolution.text, merged);
    }

    #[test]
    fn test_clean_text_is_unchanged() {
        let text = "type User {\n  id: ID!\n}\n";
        assert_eq!(resolve(text), Resolution { text: text.into(), conflicts: 0 });
    }
}
