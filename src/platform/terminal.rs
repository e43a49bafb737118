//! Terminal front end
//!
//! Draws into a pixel grid two pixels per character cell (upper half block
//! with separate foreground/background colours) and reads keys through
//! crossterm in raw mode.

use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Color as TermColor},
    terminal,
};
use glam::Vec2;

use crate::color::{Color, palette};
use crate::presentation::{InputEvent, Presenter};
use crate::sim::Rect;

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TextSpan {
    col: usize,
    row: usize,
    text: String,
    color: Color,
}

/// Field-space drawing surface rasterised onto terminal cells
#[derive(Debug, Clone)]
pub struct CellGrid {
    field: Vec2,
    cols: usize,
    /// Pixel rows, twice the terminal rows
    height: usize,
    px: Vec<Color>,
    texts: Vec<TextSpan>,
}

impl CellGrid {
    pub fn new(field: Vec2, cols: u16, rows: u16) -> Self {
        let cols = cols as usize;
        let height = rows as usize * 2;
        Self {
            field,
            cols,
            height,
            px: vec![palette::SKY; cols * height],
            texts: Vec::new(),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols as usize;
        self.height = rows as usize * 2;
        self.px.clear();
        self.px.resize(self.cols * self.height, palette::SKY);
        self.texts.clear();
    }

    /// Pixels per field unit on each axis
    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 / self.field.x,
            self.height as f32 / self.field.y,
        )
    }

    fn set(&mut self, x: i32, y: i32, c: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.height {
            self.px[y as usize * self.cols + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.px[y * self.cols + x]
    }

    pub fn fill_rect(&mut self, rect: &Rect, c: Color) {
        let s = self.scale();
        let x0 = (rect.left() * s.x).round() as i32;
        let x1 = (rect.right() * s.x).round() as i32;
        let y0 = (rect.top() * s.y).round() as i32;
        let y1 = (rect.bottom() * s.y).round() as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, c);
            }
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, c: Color) {
        let s = self.scale();
        let x0 = ((center.x - radius) * s.x).floor() as i32;
        let x1 = ((center.x + radius) * s.x).ceil() as i32;
        let y0 = ((center.y - radius) * s.y).floor() as i32;
        let y1 = ((center.y + radius) * s.y).ceil() as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new((x as f32 + 0.5) / s.x, (y as f32 + 0.5) / s.y);
                if p.distance(center) <= radius {
                    self.set(x, y, c);
                }
            }
        }
        // Always visible, even when smaller than a pixel
        self.set((center.x * s.x) as i32, (center.y * s.y) as i32, c);
    }

    pub fn put_text(&mut self, text: &str, position: Vec2, color: Color) {
        let s = self.scale();
        let col = (position.x * s.x).max(0.0) as usize;
        let row = (position.y * s.y / 2.0).max(0.0) as usize;
        if col < self.cols && row < self.height / 2 {
            self.texts.push(TextSpan {
                col,
                row,
                text: text.to_string(),
                color,
            });
        }
    }

    /// Write the grid and text overlay, then forget the text
    pub fn render(&mut self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.height / 2;
        let mut prev: Option<(Color, Color)> = None;

        for row in 0..rows {
            for col in 0..self.cols {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                if prev != Some((top, bot)) {
                    queue!(
                        out,
                        style::SetForegroundColor(term_color(top)),
                        style::SetBackgroundColor(term_color(bot))
                    )?;
                    prev = Some((top, bot));
                }
                queue!(out, style::Print('\u{2580}'))?;
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                prev = None;
            }
        }

        for span in self.texts.drain(..) {
            let room = self.cols - span.col;
            let text: String = span.text.chars().take(room).collect();
            let under = self.px[span.row * 2 * self.cols + span.col];
            queue!(
                out,
                cursor::MoveTo(span.col as u16, span.row as u16),
                style::SetForegroundColor(term_color(span.color)),
                style::SetBackgroundColor(term_color(under)),
                style::Print(text)
            )?;
        }

        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

/// Translate a key press into game input
fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputEvent::JumpPressed)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::PauseToggled),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(InputEvent::MuteToggled),
        _ => None,
    }
}

/// Full-screen presenter on stdout. The terminal is restored on drop.
pub struct TerminalPresenter {
    out: Stdout,
    grid: CellGrid,
    frame_start: Instant,
}

impl TerminalPresenter {
    pub fn new(field: Vec2) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;
        let (cols, rows) = terminal::size()?;
        log::info!("Terminal {}x{}", cols, rows);

        Ok(Self {
            out,
            grid: CellGrid::new(field, cols, rows),
            frame_start: Instant::now(),
        })
    }

    fn restore(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("Failed to restore terminal: {}", e);
        }
    }
}

impl Presenter for TerminalPresenter {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.grid.fill_rect(&rect, color);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.grid.fill_circle(center, radius, color);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color) {
        self.grid.put_text(text, position, color);
    }

    fn present_frame(&mut self) {
        if let Err(e) = self.grid.render(&mut self.out) {
            log::warn!("Terminal write failed: {}", e);
        }
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    log::warn!("Input poll failed: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) => events.extend(map_key(&key)),
                Ok(Event::Resize(cols, rows)) => self.grid.resize(cols, rows),
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Input read failed: {}", e);
                    break;
                }
            }
        }
        events
    }

    fn tick_delay(&mut self, target_hz: u32) {
        let frame = Duration::from_secs_f64(1.0 / target_hz.max(1) as f64);
        let elapsed = self.frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Vec2 = Vec2::new(400.0, 600.0);

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(&key(KeyCode::Char(' '))), Some(InputEvent::JumpPressed));
        assert_eq!(map_key(&key(KeyCode::Up)), Some(InputEvent::JumpPressed));
        assert_eq!(map_key(&key(KeyCode::Char('p'))), Some(InputEvent::PauseToggled));
        assert_eq!(map_key(&key(KeyCode::Char('m'))), Some(InputEvent::MuteToggled));
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        assert_eq!(map_key(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_release_ignored() {
        let mut release = key(KeyCode::Char(' '));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(&release), None);
    }

    #[test]
    fn test_rect_scaled_to_grid() {
        // 40 columns x 30 rows = 40x60 pixels, a tenth of the field
        let mut grid = CellGrid::new(FIELD, 40, 30);
        grid.fill_rect(&Rect::new(100.0, 200.0, 60.0, 100.0), palette::BARRIER);
        assert_eq!(grid.get(10, 20), palette::BARRIER);
        assert_eq!(grid.get(15, 29), palette::BARRIER);
        assert_eq!(grid.get(16, 20), palette::SKY);
        assert_eq!(grid.get(10, 30), palette::SKY);
    }

    #[test]
    fn test_rect_clipped_at_edges() {
        let mut grid = CellGrid::new(FIELD, 40, 30);
        grid.fill_rect(&Rect::new(-100.0, -50.0, 600.0, 800.0), palette::BARRIER);
        assert!(grid.px.iter().all(|c| *c == palette::BARRIER));
    }

    #[test]
    fn test_tiny_circle_still_drawn() {
        let mut grid = CellGrid::new(FIELD, 40, 30);
        grid.fill_circle(Vec2::new(90.0, 310.0), 1.0, palette::AVATAR);
        assert_eq!(grid.get(9, 31), palette::AVATAR);
    }

    #[test]
    fn test_render_writes_text() {
        let mut grid = CellGrid::new(FIELD, 40, 30);
        grid.put_text("Score: 3", Vec2::new(10.0, 10.0), palette::TEXT);
        grid.put_text("off screen", Vec2::new(500.0, 10.0), palette::TEXT);
        let mut out = Vec::new();
        grid.render(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Score: 3"));
        assert!(!text.contains("off screen"));
        assert!(grid.texts.is_empty());
    }

    #[test]
    fn test_long_text_truncated() {
        let mut grid = CellGrid::new(FIELD, 10, 5);
        grid.put_text("Press SPACE to Restart", Vec2::new(200.0, 0.0), palette::TEXT);
        let mut out = Vec::new();
        grid.render(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Press"));
        assert!(!text.contains("Restart"));
    }
}
