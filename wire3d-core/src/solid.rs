/// Platonic solids as point lists and edge lists
use std::fmt;
use std::str::FromStr;

use crate::edge::Edge;
use crate::transform::{point3, Point4};

/// Uniform scale applied to the tetrahedron's points
pub const TETRAHEDRON_SCALE: f64 = 1.7;

/// Golden ratio
const PHI: f64 = 1.618_033_988_749_895;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolidKind {
    Tetrahedron,
    Cube,
    Octahedron,
    Icosahedron,
    Dodecahedron,
}

impl SolidKind {
    pub const ALL: [SolidKind; 5] = [
        SolidKind::Tetrahedron,
        SolidKind::Cube,
        SolidKind::Octahedron,
        SolidKind::Icosahedron,
        SolidKind::Dodecahedron,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SolidKind::Tetrahedron => "tetrahedron",
            SolidKind::Cube => "cube",
            SolidKind::Octahedron => "octahedron",
            SolidKind::Icosahedron => "icosahedron",
            SolidKind::Dodecahedron => "dodecahedron",
        }
    }
}

impl fmt::Display for SolidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a name matches no [`SolidKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSolid(pub String);

impl fmt::Display for UnknownSolid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown solid '{}'", self.0)
    }
}

impl std::error::Error for UnknownSolid {}

impl FromStr for SolidKind {
    type Err = UnknownSolid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        SolidKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| UnknownSolid(s.to_string()))
    }
}

/// A wireframe solid: model-space points and the edges joining them
#[derive(Debug, Clone)]
pub struct Solid {
    pub kind: SolidKind,
    pub points: Vec<Point4>,
    pub edges: Vec<Edge>,
}

impl Solid {
    pub fn build(kind: SolidKind) -> Self {
        match kind {
            SolidKind::Tetrahedron => Self::tetrahedron(),
            SolidKind::Cube => Self::cube(),
            SolidKind::Octahedron => Self::octahedron(),
            SolidKind::Icosahedron => Self::icosahedron(),
            SolidKind::Dodecahedron => Self::dodecahedron(),
        }
    }

    fn from_pairs(kind: SolidKind, points: Vec<Point4>, pairs: &[(usize, usize)]) -> Self {
        let edges = pairs.iter().map(|&(a, b)| Edge::new(&points, a, b)).collect();
        Self {
            kind,
            points,
            edges,
        }
    }

    /// Four points, every pair joined
    pub fn tetrahedron() -> Self {
        let points: Vec<Point4> = [
            point3(0.5, 0.0, -0.35),
            point3(-0.5, 0.0, -0.35),
            point3(0.0, 0.5, 0.35),
            point3(0.0, -0.5, 0.35),
        ]
        .into_iter()
        .map(|p| {
            let mut scaled = p * TETRAHEDRON_SCALE;
            scaled.w = 1.0;
            scaled
        })
        .collect();

        let pairs: Vec<(usize, usize)> = (0..points.len())
            .flat_map(|i| (i + 1..points.len()).map(move |j| (i, j)))
            .collect();
        Self::from_pairs(SolidKind::Tetrahedron, points, &pairs)
    }

    /// Axis-aligned unit cube centered on the origin
    pub fn cube() -> Self {
        let points = vec![
            point3(-0.5, -0.5, -0.5),
            point3(0.5, -0.5, -0.5),
            point3(0.5, 0.5, -0.5),
            point3(-0.5, 0.5, -0.5),
            point3(-0.5, -0.5, 0.5),
            point3(0.5, -0.5, 0.5),
            point3(0.5, 0.5, 0.5),
            point3(-0.5, 0.5, 0.5),
        ];

        let mut pairs = Vec::with_capacity(12);
        for i in 0..4 {
            pairs.push((i, (i + 1) % 4));
            pairs.push((i + 4, (i + 1) % 4 + 4));
            pairs.push((i, i + 4));
        }
        Self::from_pairs(SolidKind::Cube, points, &pairs)
    }

    /// Unit points on each axis; a square around the equator plus two apexes
    pub fn octahedron() -> Self {
        let points = vec![
            point3(1.0, 0.0, 0.0),
            point3(0.0, 1.0, 0.0),
            point3(-1.0, 0.0, 0.0),
            point3(0.0, -1.0, 0.0),
            point3(0.0, 0.0, 1.0),
            point3(0.0, 0.0, -1.0),
        ];

        let mut pairs = Vec::with_capacity(12);
        for i in 0..4 {
            pairs.push((i, (i + 1) % 4));
        }
        for i in 0..4 {
            pairs.push((i, 4));
            pairs.push((i, 5));
        }
        Self::from_pairs(SolidKind::Octahedron, points, &pairs)
    }

    /// Cyclic permutations of `(0, ±1, ±φ)`, 30 edges of length 2
    pub fn icosahedron() -> Self {
        let points = vec![
            point3(-1.0, PHI, 0.0),
            point3(1.0, PHI, 0.0),
            point3(-1.0, -PHI, 0.0),
            point3(1.0, -PHI, 0.0),
            point3(0.0, -1.0, PHI),
            point3(0.0, 1.0, PHI),
            point3(0.0, -1.0, -PHI),
            point3(0.0, 1.0, -PHI),
            point3(PHI, 0.0, -1.0),
            point3(PHI, 0.0, 1.0),
            point3(-PHI, 0.0, -1.0),
            point3(-PHI, 0.0, 1.0),
        ];

        #[rustfmt::skip]
        let pairs = [
            (0, 1), (0, 5), (0, 7), (0, 10), (0, 11),
            (1, 5), (1, 7), (1, 8), (1, 9),
            (2, 3), (2, 4), (2, 6), (2, 10), (2, 11),
            (3, 4), (3, 6), (3, 8), (3, 9),
            (4, 5), (4, 9), (4, 11),
            (5, 9), (5, 11),
            (6, 7), (6, 8), (6, 10),
            (7, 8), (7, 10),
            (8, 9),
            (10, 11),
        ];
        Self::from_pairs(SolidKind::Icosahedron, points, &pairs)
    }

    /// Cube corners plus cyclic permutations of `(0, ±1/φ, ±φ)`, 30 edges of length 2/φ
    pub fn dodecahedron() -> Self {
        let inv = 1.0 / PHI;
        let mut points = Vec::with_capacity(20);
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    points.push(point3(x, y, z));
                }
            }
        }
        for s in [-1.0, 1.0] {
            for t in [-1.0, 1.0] {
                points.push(point3(0.0, s * inv, t * PHI));
            }
        }
        for s in [-1.0, 1.0] {
            for t in [-1.0, 1.0] {
                points.push(point3(s * inv, t * PHI, 0.0));
            }
        }
        for s in [-1.0, 1.0] {
            for t in [-1.0, 1.0] {
                points.push(point3(s * PHI, 0.0, t * inv));
            }
        }

        #[rustfmt::skip]
        let pairs = [
            (0, 8), (0, 12), (0, 16),
            (1, 9), (1, 12), (1, 17),
            (2, 10), (2, 13), (2, 16),
            (3, 11), (3, 13), (3, 17),
            (4, 8), (4, 14), (4, 18),
            (5, 9), (5, 14), (5, 19),
            (6, 10), (6, 15), (6, 18),
            (7, 11), (7, 15), (7, 19),
            (8, 10), (9, 11),
            (12, 14), (13, 15),
            (16, 17), (18, 19),
        ];
        Self::from_pairs(SolidKind::Dodecahedron, points, &pairs)
    }
}
