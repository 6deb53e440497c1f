//! Character-cell surface for terminals and logs

use std::collections::BTreeMap;

use glam::Vec2;

use super::Surface;
use crate::geom::Rect;
use crate::sim::{BrickKind, Entity, EntityId, EntityKind};

/// Rasterizes entity rectangles into a fixed grid of characters
#[derive(Debug, Clone)]
pub struct TextSurface {
    cols: usize,
    rows: usize,
    cell: Vec2,
    proxies: BTreeMap<EntityId, (EntityKind, Rect)>,
    /// Print every Nth presented frame (0 = never print)
    print_every: u64,
    frames: u64,
}

impl TextSurface {
    pub fn new(game_size: Vec2, cols: usize, rows: usize, print_every: u64) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cell: game_size / Vec2::new(cols as f32, rows as f32),
            proxies: BTreeMap::new(),
            print_every,
            frames: 0,
        }
    }

    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }

    fn glyph(kind: EntityKind) -> char {
        match kind {
            EntityKind::Paddle => '=',
            EntityKind::Ball => 'o',
            EntityKind::Brick(BrickKind::Normal) => '#',
            EntityKind::Brick(BrickKind::Solid) => 'S',
        }
    }

    fn layer(kind: EntityKind) -> u8 {
        match kind {
            EntityKind::Brick(_) => 0,
            EntityKind::Paddle => 1,
            EntityKind::Ball => 2,
        }
    }

    fn cell_index(&self, p: Vec2) -> (usize, usize) {
        let c = (p / self.cell).floor();
        (
            (c.x.max(0.0) as usize).min(self.cols - 1),
            (c.y.max(0.0) as usize).min(self.rows - 1),
        )
    }

    /// Render the current proxies, framed by a border
    pub fn render(&self) -> String {
        let mut grid = vec![vec![' '; self.cols]; self.rows];

        let mut proxies: Vec<_> = self.proxies.values().collect();
        proxies.sort_by_key(|(kind, _)| Self::layer(*kind));

        for (kind, rect) in proxies {
            let glyph = Self::glyph(*kind);
            let (x0, y0) = self.cell_index(rect.min());
            // Max edge is exclusive; nudge inward so exact multiples don't spill
            let (x1, y1) = self.cell_index(rect.max() - Vec2::splat(0.001));
            for row in grid.iter_mut().take(y1 + 1).skip(y0) {
                for cell in row.iter_mut().take(x1 + 1).skip(x0) {
                    *cell = glyph;
                }
            }
        }

        let border: String = std::iter::repeat_n('-', self.cols).collect();
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 2));
        out.push('+');
        out.push_str(&border);
        out.push_str("+\n");
        for row in grid {
            out.push('|');
            out.extend(row);
            out.push_str("|\n");
        }
        out.push('+');
        out.push_str(&border);
        out.push('+');
        out
    }
}

impl Surface for TextSurface {
    fn spawn(&mut self, id: EntityId, entity: &Entity) {
        self.proxies.insert(id, (entity.kind, entity.rect()));
    }

    fn despawn(&mut self, id: EntityId) {
        self.proxies.remove(&id);
    }

    fn update(&mut self, id: EntityId, entity: &Entity) {
        if let Some(proxy) = self.proxies.get_mut(&id) {
            proxy.1 = entity.rect();
        }
    }

    fn present(&mut self) {
        self.frames += 1;
        if self.print_every > 0 && self.frames % self.print_every == 0 {
            println!("frame {}\n{}", self.frames, self.render());
        }
    }
}
