use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use giftbox_core::{
    parse_hex_color, BoxLayout, BoxState, ConfettiConfig, PanelState, ParticleEffect, Rect,
    RoundSummary, Viewport,
};
use rand::Rng;

const CELL_WIDTH: f64 = 20.0;
const CELL_HEIGHT: f64 = 5.0;
const GRID_COLUMNS: usize = 3;
const BURST_ROWS: usize = 4;
const GLYPHS: [char; 5] = ['*', '+', 'o', '.', '~'];

/// Boxes laid out in a fixed grid of terminal cells
#[derive(Debug, Clone)]
pub struct GridLayout {
    boxes: usize,
    columns: usize,
}

impl GridLayout {
    pub fn new(boxes: usize) -> Self {
        Self {
            boxes,
            columns: GRID_COLUMNS.min(boxes.max(1)),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn rows(&self) -> usize {
        ((self.boxes + self.columns - 1) / self.columns).max(1)
    }

    pub fn width(&self) -> usize {
        self.columns * CELL_WIDTH as usize
    }
}

impl BoxLayout for GridLayout {
    fn box_rect(&self, index: usize) -> Rect {
        let col = (index % self.columns) as f64;
        let row = (index / self.columns) as f64;
        Rect::new(col * CELL_WIDTH, row * CELL_HEIGHT, CELL_WIDTH, CELL_HEIGHT)
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.columns as f64 * CELL_WIDTH,
            height: self.rows() as f64 * CELL_HEIGHT,
        }
    }
}

/// Colored glyph burst printed above the board
pub struct TerminalConfetti {
    width: usize,
}

impl TerminalConfetti {
    pub fn new(width: usize) -> Self {
        Self { width: width.max(1) }
    }
}

impl ParticleEffect for TerminalConfetti {
    fn fire(&self, config: &ConfettiConfig) {
        let mut rng = rand::thread_rng();
        let palette: Vec<(u8, u8, u8)> = config
            .colors
            .iter()
            .filter_map(|c| parse_hex_color(c))
            .collect();

        let center = (config.origin.x.clamp(0.0, 1.0) * self.width as f64) as isize;
        let half = ((config.spread as f64 / 360.0) * self.width as f64).max(1.0) as isize;

        let mut rows: Vec<Vec<Option<(char, Option<(u8, u8, u8)>)>>> =
            vec![vec![None; self.width]; BURST_ROWS];

        for _ in 0..config.particle_count {
            let row = rng.gen_range(0..BURST_ROWS);
            let col = center + rng.gen_range(-half..=half);
            if col < 0 || col as usize >= self.width {
                continue;
            }
            let glyph = GLYPHS[rng.gen_range(0..GLYPHS.len())];
            let color = if palette.is_empty() {
                None
            } else {
                Some(palette[rng.gen_range(0..palette.len())])
            };
            rows[row][col as usize] = Some((glyph, color));
        }

        println!();
        for row in rows {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Some((glyph, Some((r, g, b)))) => {
                        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, glyph)
                    }
                    Some((glyph, None)) => glyph.to_string(),
                    None => " ".to_string(),
                })
                .collect();
            println!("{}", line.trim_end());
        }
    }
}

/// Prints the burst arguments as JSON, one line per burst
pub struct JsonConfetti;

impl ParticleEffect for JsonConfetti {
    fn fire(&self, config: &ConfettiConfig) {
        match serde_json::to_string(config) {
            Ok(json) => println!("confetti({})", json),
            Err(e) => tracing::warn!("Could not encode confetti burst: {}", e),
        }
    }
}

fn box_label(index: usize, state: &BoxState) -> String {
    let status = if state.opened {
        "OPENED"
    } else if state.disabled {
        "locked"
    } else {
        "[ gift ]"
    };
    format!("#{}\n{}", index + 1, status)
}

pub fn board_table(boxes: &[BoxState], columns: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let columns = columns.max(1);
    for (row, chunk) in boxes.chunks(columns).enumerate() {
        let cells: Vec<Cell> = chunk
            .iter()
            .enumerate()
            .map(|(col, state)| {
                Cell::new(box_label(row * columns + col, state))
                    .set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }

    table
}

pub fn panel_table(panel: &PanelState) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![Cell::new(&panel.title).set_alignment(CellAlignment::Center)]);

    let text = if panel.failure_style {
        format!("{} :(", panel.prize_text)
    } else {
        panel.prize_text.clone()
    };
    table.add_row(vec![Cell::new(text).set_alignment(CellAlignment::Center)]);

    table
}

pub fn history_table(rounds: &[RoundSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Round", "Box", "Prize", "Opened At"]);

    for summary in rounds {
        let round = summary.round.to_string();
        table.add_row(vec![
            round[..8].to_string(),
            summary
                .box_index
                .map(|i| format!("#{}", i + 1))
                .unwrap_or_else(|| "-".to_string()),
            summary
                .prize
                .as_ref()
                .map(|p| p.label.clone())
                .unwrap_or_default(),
            summary
                .revealed_at
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftbox_core::{confetti_origin, ConfettiSettings, Origin, Prize};

    fn box_state(opened: bool, disabled: bool) -> BoxState {
        BoxState {
            prize: Some(Prize::success("Mug")),
            opened,
            disabled,
            interactive: !disabled,
        }
    }

    #[test]
    fn test_burst_skips_unparseable_colors() {
        let mut config = ConfettiSettings::default().burst_at(
            &Rect::new(0.0, 0.0, 20.0, 5.0),
            &Viewport {
                width: 60.0,
                height: 5.0,
            },
        );
        config.colors = vec!["#a\u{e9}123".to_string(), "#ff0000".to_string()];
        TerminalConfetti::new(60).fire(&config);

        config.colors = vec!["#a\u{e9}123".to_string()];
        config.origin = Origin { x: 2.0, y: -0.5 };
        TerminalConfetti::new(60).fire(&config);
    }

    #[test]
    fn test_board_marks_opened_and_locked_boxes() {
        let boxes = vec![
            box_state(false, true),
            box_state(true, false),
            box_state(false, true),
            box_state(false, true),
        ];

        let rendered = board_table(&boxes, 3).to_string();
        assert_eq!(rendered.matches("OPENED").count(), 1);
        assert_eq!(rendered.matches("locked").count(), 3);
        assert!(!rendered.contains("Mug"));
        assert!(rendered.contains("#4"));
    }

    #[test]
    fn test_board_before_reveal() {
        let boxes = vec![box_state(false, false); 6];
        let rendered = board_table(&boxes, 3).to_string();
        assert_eq!(rendered.matches("[ gift ]").count(), 6);
        assert!(!rendered.contains("OPENED"));
    }

    #[test]
    fn test_panel_styles() {
        let mut panel = PanelState {
            prize_text: "New Year cashback! Try again...".to_string(),
            title: "Oh, what a pity!".to_string(),
            failure_style: true,
            visible: true,
        };

        let rendered = panel_table(&panel).to_string();
        assert!(rendered.contains("Oh, what a pity!"));
        assert!(rendered.contains("Try again... :("));

        panel.prize_text = "Coupon for hugs".to_string();
        panel.title = "Happy New Year!".to_string();
        panel.failure_style = false;

        let rendered = panel_table(&panel).to_string();
        assert!(rendered.contains("Happy New Year!"));
        assert!(rendered.contains("Coupon for hugs"));
        assert!(!rendered.contains(":("));
    }

    #[test]
    fn test_grid_geometry() {
        let layout = GridLayout::new(6);
        assert_eq!(layout.columns(), 3);
        assert_eq!(layout.width(), 60);

        let viewport = layout.viewport();
        assert_eq!(viewport.width, 60.0);
        assert_eq!(viewport.height, 10.0);

        // box 5 is the middle of the bottom row
        let origin = confetti_origin(&layout.box_rect(4), &viewport, 0.1);
        assert!((origin.x - 0.5).abs() < 1e-9);
        assert!((origin.y - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_small_grid() {
        let layout = GridLayout::new(2);
        assert_eq!(layout.columns(), 2);
        assert_eq!(layout.viewport().height, 5.0);
    }
}
