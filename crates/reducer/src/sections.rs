use std::collections::HashSet;

use crate::markers::{is_failure_signal, parse_section_marker, SectionMarker};

/// A named CI section with its boundary lines kept verbatim.
#[derive(Debug, Default)]
struct Section {
    start: String,
    body: Vec<String>,
    end: Option<String>,
}

impl Section {
    fn failed(&self) -> bool {
        self.body.iter().any(|line| is_failure_signal(line))
    }

    fn into_lines(self, cap: usize) -> Vec<String> {
        let mut out = Vec::with_capacity(cap + 2);
        out.push(self.start);
        out.extend(truncate_keeping_signals(self.body, cap));
        out.extend(self.end);
        out
    }
}

#[derive(Debug)]
enum Block {
    Loose(String),
    Section(Section),
}

fn split_blocks(lines: Vec<String>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open: Option<Section> = None;

    for line in lines {
        match parse_section_marker(&line) {
            Some(SectionMarker::Start(_)) => {
                if let Some(section) = open.take() {
                    blocks.push(Block::Section(section));
                }
                open = Some(Section {
                    start: line,
                    ..Default::default()
                });
            }
            Some(SectionMarker::End(_)) => match open.take() {
                Some(mut section) => {
                    section.end = Some(line);
                    blocks.push(Block::Section(section));
                }
                None => blocks.push(Block::Loose(line)),
            },
            None => match open.as_mut() {
                Some(section) => section.body.push(line),
                None => blocks.push(Block::Loose(line)),
            },
        }
    }

    if let Some(section) = open {
        blocks.push(Block::Section(section));
    }

    blocks
}

/// Keep failing sections (or the last one when none failed) and truncate
/// them; logs without section markers are truncated as a whole.
///
/// Lines outside any section are truncated per run, where a run ends at the
/// next kept section, so the cap also holds around sections.
pub fn select_sections(lines: Vec<String>, cap: usize) -> Vec<String> {
    let blocks = split_blocks(lines);
    let section_count = blocks
        .iter()
        .filter(|b| matches!(b, Block::Section(_)))
        .count();

    let any_failed = blocks
        .iter()
        .any(|b| matches!(b, Block::Section(s) if s.failed()));
    if section_count > 0 && !any_failed {
        log::debug!("no section reported a failure; keeping the last of {section_count}");
    }

    let mut seen_sections = 0usize;
    let mut loose = Vec::new();
    let mut out = Vec::new();
    for block in blocks {
        match block {
            Block::Loose(line) => loose.push(line),
            Block::Section(section) => {
                seen_sections += 1;
                let keep = if any_failed {
                    section.failed()
                } else {
                    seen_sections == section_count
                };
                if keep {
                    out.extend(truncate_keeping_signals(std::mem::take(&mut loose), cap));
                    out.extend(section.into_lines(cap));
                }
            }
        }
    }
    out.extend(truncate_keeping_signals(loose, cap));

    out
}

/// Keep the last lines within `cap`, hoisting failure lines from the dropped
/// head ahead of an omission marker. The result never exceeds `cap` lines.
pub fn truncate_keeping_signals(lines: Vec<String>, cap: usize) -> Vec<String> {
    let len = lines.len();
    if len <= cap {
        return lines;
    }

    let signals: Vec<bool> = lines.iter().map(|l| is_failure_signal(l)).collect();

    // Shrink the tail until hoisted lines + marker + tail fit.
    let mut tail = cap.saturating_sub(1);
    let mut head_end = len - tail;
    let mut distinct: HashSet<&str> = lines[..head_end]
        .iter()
        .zip(&signals)
        .filter(|(_, is_signal)| **is_signal)
        .map(|(line, _)| line.as_str())
        .collect();
    while tail > 0 && distinct.len() + 1 + tail > cap {
        tail -= 1;
        head_end += 1;
        if signals[head_end - 1] {
            distinct.insert(lines[head_end - 1].as_str());
        }
    }

    let mut hoisted: Vec<usize> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for idx in 0..head_end {
        if signals[idx] && seen.insert(lines[idx].as_str()) {
            hoisted.push(idx);
        }
    }
    let hoist_budget = cap.saturating_sub(1 + tail);
    if hoisted.len() > hoist_budget {
        hoisted.drain(..hoisted.len() - hoist_budget);
    }

    let omitted = head_end - hoisted.len();
    let mut out = Vec::with_capacity(cap);
    out.extend(hoisted.iter().map(|&idx| lines[idx].clone()));
    out.push(format!("... [{omitted} lines omitted] ..."));
    out.extend(lines[head_end..].iter().cloned());
    out
}
