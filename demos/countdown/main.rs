use bubbletea_ring::prelude::*;
use bubbletea_rs::{Cmd, KeyMsg, Model, Msg, Program};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use std::fs::File;
use std::sync::Mutex;
use tracing::Level;

const TOTAL: i64 = 20;
const LOG_FILE: &str = "countdown.log";

struct App {
    ring: Ring,
    done: bool,
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let mut ring = match ring_new(
            TOTAL,
            &[
                with_center(CenterMode::PercentageRemaining),
                with_size(Size::Small),
                with_colors("#EE6FF8", "#606060"),
                with_button(),
                with_completion(|finished| tracing::info!(finished, "countdown finished")),
            ],
        ) {
            Ok(ring) => ring,
            Err(err) => panic!("demo configuration rejected: {err}"),
        };
        ring.focus();
        let cmd = ring.init();
        (Self { ring, done: false }, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            match key_msg.key {
                KeyCode::Char('q') | KeyCode::Esc => return Some(bubbletea_rs::quit()),
                KeyCode::Char('r') => {
                    self.done = false;
                    return Some(self.ring.restart());
                }
                _ => {}
            }
        }

        if let Some(completed) = msg.downcast_ref::<RingCompletedMsg>() {
            if completed.id == self.ring.id() {
                self.done = true;
            }
        }

        self.ring.update(msg)
    }

    fn view(&self) -> String {
        let status = if self.done {
            "Done!"
        } else if self.ring.paused() {
            "Paused"
        } else {
            "Counting down"
        };

        let help: Vec<String> = self
            .ring
            .keymap
            .short_help()
            .iter()
            .map(|b| format!("{} {}", b.help, b.description))
            .chain(["r restart".to_string(), "q quit".to_string()])
            .collect();

        let faint = Style::new().faint(true);
        format!(
            "\n{}\n\n  {}\n  {}\n  {}\n",
            self.ring.view(),
            status,
            faint.render(&help.join(" • ")),
            faint.render(&format!("logging to {LOG_FILE}"))
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The terminal belongs to the UI, so logs go to a file
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(File::create(LOG_FILE)?))
        .init();

    let program = Program::<App>::builder().build()?;
    program.run().await?;
    Ok(())
}
