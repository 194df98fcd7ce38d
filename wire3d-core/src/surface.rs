/// Line-drawing boundary between the pipeline and a presentation layer
use std::collections::BTreeMap;
use std::fmt;

/// Identifies one line primitive on a [`DrawSurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineHandle(u64);

impl LineHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::gray(0);
    pub const WHITE: Rgb = Rgb::gray(255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The same level in every channel
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

/// Formats as `#rrggbb`
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A pixel-space segment and its stroke color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub color: Rgb,
}

/// Something that can hold and redraw line primitives.
///
/// Primitives are retained: they are created once, then moved and recolored
/// every frame. Later-created primitives are drawn over earlier ones.
pub trait DrawSurface {
    fn create_line(&mut self) -> LineHandle;
    fn update_line(&mut self, handle: LineHandle, from: [f64; 2], to: [f64; 2], color: Rgb);
    fn delete_line(&mut self, handle: LineHandle);
}

/// In-memory [`DrawSurface`] that keeps lines in creation order
#[derive(Debug, Default)]
pub struct LineStore {
    next_id: u64,
    lines: BTreeMap<LineHandle, Line>,
}

impl LineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, handle: LineHandle) -> Option<&Line> {
        self.lines.get(&handle)
    }

    /// Lines in stacking order, bottom first
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }
}

impl DrawSurface for LineStore {
    fn create_line(&mut self) -> LineHandle {
        let handle = LineHandle::new(self.next_id);
        self.next_id += 1;
        self.lines.insert(
            handle,
            Line {
                from: [0.0, 0.0],
                to: [0.0, 0.0],
                color: Rgb::BLACK,
            },
        );
        handle
    }

    fn update_line(&mut self, handle: LineHandle, from: [f64; 2], to: [f64; 2], color: Rgb) {
        match self.lines.get_mut(&handle) {
            Some(line) => *line = Line { from, to, color },
            None => log::warn!("update of unknown line {}", handle.id()),
        }
    }

    fn delete_line(&mut self, handle: LineHandle) {
        self.lines.remove(&handle);
    }
}
