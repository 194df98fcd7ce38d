/// Terminal front end for the wireframe renderer
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{LineStore, Scene, SceneConfig, SolidKind};

pub mod renderer;

pub use renderer::LineRasterizer;

/// Slider movement per key press, in slider positions
pub const SLIDER_STEP: f64 = 2.0;

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    scene: Scene,
    lines: LineStore,
    rasterizer: LineRasterizer,
    slider_x: f64,
    slider_y: f64,
    fps: FpsCounter,
}

/// Frame rate averaged over windows of at least one second
#[derive(Debug)]
struct FpsCounter {
    window_start: Instant,
    frames: u32,
    rate: f32,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            rate: 0.0,
        }
    }

    /// Count a frame finished at `now`
    fn frame(&mut self, now: Instant) {
        self.frames += 1;
        let window = now.saturating_duration_since(self.window_start);
        if window >= Self::WINDOW {
            self.rate = self.frames as f32 / window.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
        }
    }
}

impl TerminalApp {
    /// Create an app sized to the current terminal.
    ///
    /// The terminal size replaces the configured viewport dimensions.
    pub fn new(config: SceneConfig) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        Self::with_size(config, cols, rows)
    }

    pub fn with_size(config: SceneConfig, cols: u16, rows: u16) -> Result<Self> {
        let scene = Scene::new(SceneConfig {
            width: cols as u32,
            height: rows as u32 * 2,
            ..config
        })?;

        Ok(Self {
            scene,
            lines: LineStore::new(),
            rasterizer: LineRasterizer::new(cols as usize, rows as usize),
            slider_x: 0.0,
            slider_y: 0.0,
            fps: FpsCounter::new(Instant::now()),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn lines(&self) -> &LineStore {
        &self.lines
    }

    pub fn rasterizer(&self) -> &LineRasterizer {
        &self.rasterizer
    }

    /// Take over the terminal until the scene stops, restoring it afterwards
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        result
    }

    /// One scene tick per frame; sleeps out whatever is left of the tick
    fn main_loop(&mut self) -> Result<()> {
        let frame_time = self.scene.tick_duration();

        while self.scene.is_running() {
            let started = Instant::now();
            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?)?;
            }

            self.update();
            self.render()?;

            if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
            self.fps.frame(Instant::now());
        }

        log::debug!("stopped after {:?}", self.scene.elapsed());
        Ok(())
    }

    /// Apply one terminal event to the scene
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(cols, rows) => {
                if cols == 0 || rows == 0 {
                    log::debug!("ignoring resize to {cols}x{rows}");
                    return Ok(());
                }
                self.scene.resize(cols as u32, rows as u32 * 2)?;
                self.rasterizer.resize(cols as usize, rows as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) {
        if kind == KeyEventKind::Release {
            return;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.scene.stop();
            }
            KeyCode::Left => self.move_slider_x(-SLIDER_STEP),
            KeyCode::Right => self.move_slider_x(SLIDER_STEP),
            KeyCode::Down => self.move_slider_y(-SLIDER_STEP),
            KeyCode::Up => self.move_slider_y(SLIDER_STEP),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.scene.select(SolidKind::ALL[index], &mut self.lines);
            }
            _ => {}
        }
    }

    fn move_slider_x(&mut self, delta: f64) {
        self.slider_x = (self.slider_x + delta).clamp(0.0, 100.0);
        self.scene.set_slider_x(self.slider_x);
    }

    fn move_slider_y(&mut self, delta: f64) {
        self.slider_y = (self.slider_y + delta).clamp(0.0, 100.0);
        self.scene.set_slider_y(self.slider_y);
    }

    /// Advance the scene one frame and rasterize the result
    pub fn update(&mut self) {
        // A failed frame keeps the previous one on screen.
        if let Err(err) = self.scene.tick(&mut self.lines) {
            log::debug!("keeping previous frame: {err}");
        }
        self.rasterizer.clear();
        self.rasterizer.render_lines(self.lines.lines());
    }

    fn render(&mut self) -> Result<()> {
        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.rasterizer.draw(&mut stdout)?;

        // Draw UI overlay
        let rotation = self.scene.rotation();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(Color::Black),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Wire3D | {} | x {:.2} y {:.2} | FPS: {:.1} | Arrows=Rotate 1-5=Solid Q=Quit",
                self.scene.solid().kind,
                rotation.x,
                rotation.y,
                self.fps.rate
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::f64::consts::PI;

    fn app() -> TerminalApp {
        TerminalApp::with_size(SceneConfig::default(), 80, 24).unwrap()
    }

    fn press(app: &mut TerminalApp, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .unwrap();
    }

    #[test]
    fn test_viewport_uses_half_block_pixels() {
        let app = app();
        let viewport = app.scene().viewport();
        assert_eq!((viewport.width(), viewport.height()), (80, 48));
        assert_eq!(app.rasterizer().size(), (80, 48));
    }

    #[test]
    fn test_update_draws_the_cube() {
        let mut app = app();
        app.update();
        assert_eq!(app.lines().len(), 12);

        let (w, h) = app.rasterizer().size();
        let lit = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| app.rasterizer().pixel(x, y).is_some())
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_digit_keys_select_solids() {
        let mut app = app();
        app.update();

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.scene().solid().kind, SolidKind::Icosahedron);
        assert!(app.lines().is_empty());

        app.update();
        assert_eq!(app.lines().len(), 30);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.scene().solid().kind, SolidKind::Tetrahedron);
    }

    #[test]
    fn test_arrows_move_sliders() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        let expected = PI - SLIDER_STEP / 100.0 * PI;
        assert!((app.scene().rotation().x - expected).abs() < 1e-12);

        // Clamped at the low end.
        press(&mut app, KeyCode::Down);
        assert!((app.scene().rotation().y - PI).abs() < 1e-12);

        press(&mut app, KeyCode::Up);
        let expected = PI - SLIDER_STEP / 100.0 * 2.0 * PI;
        assert!((app.scene().rotation().y - expected).abs() < 1e-12);
    }

    #[test]
    fn test_fps_counter_windows() {
        let start = Instant::now();
        let mut fps = FpsCounter::new(start);

        for i in 1..=29 {
            fps.frame(start + Duration::from_millis(i * 30));
        }
        assert_eq!(fps.rate, 0.0);
        assert_eq!(fps.frames, 29);

        // Frame 30 lands exactly on the one-second mark.
        fps.frame(start + Duration::from_millis(1000));
        assert!((fps.rate - 30.0).abs() < 1e-3);
        assert_eq!(fps.frames, 0);

        fps.frame(start + Duration::from_millis(2000));
        assert!((fps.rate - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_quit_stops_scene() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.scene().is_running());
    }

    #[test]
    fn test_resize_event() {
        let mut app = app();
        app.handle_event(Event::Resize(100, 30)).unwrap();
        assert_eq!(app.scene().viewport().width(), 100);
        assert_eq!(app.scene().viewport().height(), 60);
        assert_eq!(app.rasterizer().size(), (100, 60));

        app.handle_event(Event::Resize(0, 30)).unwrap();
        assert_eq!(app.scene().viewport().width(), 100);
    }
}
