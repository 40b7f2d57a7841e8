/// Terminal-based ASCII wireframe viewer
use bucky_core::{Plane, RotationState, Wireframe};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::debug;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Render one frame of `wireframe` rotated by `rotation` as plain text.
pub fn render_frame(
    wireframe: &Wireframe,
    rotation: &RotationState,
    plane: Plane,
    width: usize,
    height: usize,
) -> String {
    let mut renderer = AsciiRenderer::new(width, height);
    renderer.render_wireframe(wireframe, &rotation.matrix(), plane);
    renderer.to_text()
}

/// Main application struct for interactive terminal rendering
pub struct TerminalApp {
    wireframe: Wireframe,
    rotation: RotationState,
    plane: Plane,
    renderer: AsciiRenderer,
    spin: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(wireframe: Wireframe, rotation: RotationState, plane: Plane) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            wireframe,
            rotation,
            plane,
            renderer: AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize),
            spin: true,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
            Event::Resize(width, height) => {
                debug!("terminal resized to {}x{}", width, height);
                self.renderer
                    .resize(width as usize, height.saturating_sub(1) as usize);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => {
                self.rotation.rotate(0.1, 0.0, 0.0);
            }
            KeyCode::Char('s') | KeyCode::Down => {
                self.rotation.rotate(-0.1, 0.0, 0.0);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.rotation.rotate(0.0, -0.1, 0.0);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.rotation.rotate(0.0, 0.1, 0.0);
            }
            KeyCode::Char('e') => {
                self.rotation.rotate(0.0, 0.0, 0.1);
            }
            KeyCode::Char('r') => {
                self.rotation.rotate(0.0, 0.0, -0.1);
            }
            KeyCode::Char(' ') => {
                self.spin = !self.spin;
            }
            KeyCode::Char('p') => {
                self.plane = match self.plane {
                    Plane::XY => Plane::XZ,
                    Plane::XZ => Plane::YZ,
                    Plane::YZ => Plane::XY,
                };
            }
            _ => {}
        }
    }

    fn update(&mut self) {
        if self.spin {
            self.rotation.rotate(0.01, 0.015, 0.0);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer
            .render_wireframe(&self.wireframe, &self.rotation.matrix(), self.plane);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Bucky | {} vertices, {} edges | {:?} | FPS: {:.1} | WASD/Arrows=Rotate E/R=Roll P=Plane Space=Spin Q=Quit",
                self.wireframe.vertices.len(),
                self.wireframe.edges.len(),
                self.plane,
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
