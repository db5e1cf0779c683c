use std::fmt;

use super::state::{ProcessId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Idle,
    Process(ProcessId),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Idle => write!(f, "IDLE"),
            Owner::Process(id) => write!(f, "P{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub owner: Owner,
    pub start: Ticks,
    pub end: Ticks,
}

impl Segment {
    pub fn new(owner: Owner, start: Ticks, end: Ticks) -> Self {
        Self { owner, start, end }
    }

    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.owner == Owner::Idle
    }
}

#[derive(Debug, Default)]
pub struct TimelineBuilder {
    segments: Vec<Segment>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `owner` held the CPU over `[start, end)`, extending the
    /// last segment when it belongs to the same owner and ends at `start`.
    pub fn append(&mut self, owner: Owner, start: Ticks, end: Ticks) {
        debug_assert!(start <= end, "Segment [{start}, {end}) runs backwards");
        if start == end {
            return;
        }

        if let Some(last) = self.segments.last_mut() {
            if last.owner == owner && last.end == start {
                last.end = end;
                return;
            }
        }

        self.segments.push(Segment::new(owner, start, end));
    }

    pub fn build(self) -> Timeline {
        Timeline {
            segments: self.segments,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn makespan(&self) -> Ticks {
        self.segments.last().map_or(0, |s| s.end)
    }

    pub fn idle_ticks(&self) -> Ticks {
        self.iter().filter(|s| s.is_idle()).map(Segment::duration).sum()
    }

    pub fn busy_ticks(&self) -> Ticks {
        self.makespan() - self.idle_ticks()
    }

    /// True when segments tile `[0, makespan)` with no gaps and no two
    /// neighbours share an owner.
    pub fn is_partition(&self) -> bool {
        let mut cursor = 0;
        let mut prev: Option<Owner> = None;
        for seg in &self.segments {
            if seg.start != cursor || seg.start >= seg.end || prev == Some(seg.owner) {
                return false;
            }
            cursor = seg.end;
            prev = Some(seg.owner);
        }
        true
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
