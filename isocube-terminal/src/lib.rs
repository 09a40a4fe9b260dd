/// Terminal player for the isometric hero cube
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use isocube_core::{FrameClock, HeroScene, Palette, SceneConfig};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

const SPEED_STEP: f64 = 0.25;
const MAX_SPEED: f64 = 8.0;

/// Main application struct for terminal playback
pub struct TerminalApp {
    scene: HeroScene,
    palette: Palette,
    canvas: (f64, f64),
    clock: FrameClock,
    renderer: AsciiRenderer,
    running: bool,
    last_tick: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: &SceneConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let canvas = (config.canvas_width, config.canvas_height);
        let now = Instant::now();

        Ok(Self {
            scene: HeroScene::new(config),
            palette: config.palette.clone(),
            canvas,
            clock: FrameClock::new(),
            // top row is reserved for the status line
            renderer: AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize, canvas.0, canvas.1),
            running: true,
            last_tick: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Set playback speed; negative or non-finite values keep the current speed
    pub fn set_speed(&mut self, speed: f64) {
        if !(speed.is_finite() && speed >= 0.0) {
            log::warn!("Ignoring playback speed {}, keeping x{}", speed, self.clock.speed());
            return;
        }
        if speed > MAX_SPEED {
            log::warn!("Playback speed {} clamped to x{}", speed, MAX_SPEED);
        }
        self.clock.set_speed(speed.min(MAX_SPEED));
    }

    pub fn run(&mut self) -> io::Result<()> {
        log::info!("Starting terminal playback");
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        log::info!("Stopped after {:.1}s of animation time", self.clock.elapsed());
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        self.last_tick = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            let dt = frame_start.duration_since(self.last_tick).as_secs_f64();
            self.last_tick = frame_start;
            self.clock.tick(dt);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
            Event::Resize(width, height) => {
                self.renderer = AsciiRenderer::new(
                    width as usize,
                    height.saturating_sub(1) as usize,
                    self.canvas.0,
                    self.canvas.1,
                );
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char(' ') => {
                self.clock.toggle();
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                let speed = (self.clock.speed() + SPEED_STEP).min(MAX_SPEED);
                self.clock.set_speed(speed);
            }
            KeyCode::Char('-') | KeyCode::Down => {
                let speed = (self.clock.speed() - SPEED_STEP).max(0.0);
                self.clock.set_speed(speed);
            }
            KeyCode::Char('r') => {
                self.clock.reset();
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.scene.frame(self.clock.elapsed());

        self.renderer.clear();
        self.renderer.render_frame(&frame, &self.palette);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.renderer.draw(&mut stdout)?;

        // Draw status line
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "isocube | t={:>6.2}s x{:.2}{} | FPS: {:.1} | Space=Pause +/-=Speed R=Restart Q=Quit",
                self.clock.elapsed(),
                self.clock.speed(),
                if self.clock.is_paused() { " (paused)" } else { "" },
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Render a single frame at `time` seconds without touching terminal modes
pub fn snapshot<W: Write>(
    writer: &mut W,
    config: &SceneConfig,
    time: f64,
    columns: usize,
    rows: usize,
    color: bool,
) -> io::Result<()> {
    if columns == 0 || rows == 0 {
        log::warn!("Snapshot size {}x{} is empty, nothing to draw", columns, rows);
    }
    let scene = HeroScene::new(config);
    let mut renderer = AsciiRenderer::new(columns, rows, config.canvas_width, config.canvas_height);
    renderer.render_frame(&scene.frame(time), &config.palette);
    if color {
        renderer.draw(writer)?;
        writer.write_all(b"\n")?;
    } else {
        writer.write_all(renderer.to_plain_text().as_bytes())?;
    }
    writer.flush()
}
