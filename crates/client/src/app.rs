//! Terminal game loop: read a line, queue commands, let the world catch up,
//! redraw.

use anyhow::Result;
use delve_content::{ActorLoader, ConfigLoader, MapLoader};
use delve_core::{GameConfig, TerrainRegistry};
use delve_runtime::{RuntimeConfig, Session};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::ClientConfig;
use crate::input::{HELP, InputCommand};
use crate::render::{render_map, visible_glyphs};

const DEMO_MAP: &str = include_str!("../maps/demo.txt");
const DEMO_NPCS: &str = include_str!("../maps/demo_npcs.ron");

pub struct App {
    config: ClientConfig,
    session: Session,
    /// Messages already shown, by the log's lifetime count.
    shown: usize,
}

impl App {
    /// Loads the map, NPCs and game configuration named by `config`.
    pub fn bootstrap(config: ClientConfig) -> Result<Self> {
        let registry = TerrainRegistry::standard();
        let mut state = match &config.map_path {
            Some(path) => MapLoader::load(path, &registry)?,
            None => MapLoader::parse(DEMO_MAP, &registry)?,
        };

        let spawns = match (&config.npcs_path, &config.map_path) {
            (Some(path), _) => ActorLoader::load(path)?,
            (None, None) => ActorLoader::parse(DEMO_NPCS)?,
            (None, Some(_)) => Vec::new(),
        };
        ActorLoader::spawn_all(&mut state, &spawns)?;

        let game = match &config.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => GameConfig::default(),
        };
        let mut runtime = RuntimeConfig::new(game);
        if let Some(seed) = config.seed {
            runtime = runtime.with_npc_seed(seed);
        }

        tracing::info!(
            map = ?config.map_path,
            npcs = spawns.len(),
            seed = runtime.npc_seed,
            "Starting delve"
        );
        let session = Session::new_game(state, runtime)?;
        Ok(Self {
            config,
            session,
            shown: 0,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.draw(&mut stdout).await?;
        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match line.parse::<InputCommand>() {
                Ok(InputCommand::Quit) => break,
                Ok(command) => command,
                Err(error) => {
                    stdout.write_all(format!("{error}\n").as_bytes()).await?;
                    continue;
                }
            };
            self.apply(command, &mut stdout).await?;

            let poll = self.session.run_until_input()?;
            if !poll.awaiting_input {
                tracing::warn!(
                    steps = poll.outcomes.len(),
                    "world did not settle; press enter to keep going"
                );
            }
            self.draw(&mut stdout).await?;
        }

        tracing::info!("Client shutdown complete");
        Ok(())
    }

    async fn apply(
        &mut self,
        command: InputCommand,
        stdout: &mut tokio::io::Stdout,
    ) -> Result<()> {
        match command {
            InputCommand::GoTo(target) => self.session.click(target),
            InputCommand::Turn { clockwise } => self.session.turn(clockwise),
            InputCommand::Advance => self.session.advance(),
            InputCommand::Walk(direction) => self.session.walk(direction.orientation()),
            InputCommand::Door { direction, open } => {
                self.session.operate_door(direction.orientation(), open);
            }
            InputCommand::Stop => self.session.interrupt(),
            InputCommand::Look | InputCommand::Quit => {}
            InputCommand::Save => {
                if let Err(error) = self.session.save(&self.config.save_path) {
                    tracing::warn!(%error, "save failed");
                    stdout.write_all(format!("{error}\n").as_bytes()).await?;
                }
            }
            InputCommand::Load => {
                let runtime = self.session.config().clone();
                match Session::restore(&self.config.save_path, runtime) {
                    Ok(session) => {
                        self.session = session;
                        self.shown = 0;
                    }
                    Err(error) => {
                        tracing::warn!(%error, "load failed");
                        stdout.write_all(format!("{error}\n").as_bytes()).await?;
                    }
                }
            }
            InputCommand::Help => {
                stdout.write_all(format!("{HELP}\n").as_bytes()).await?;
            }
        }
        Ok(())
    }

    /// Prints the visible map, then any messages not shown yet.
    async fn draw(&mut self, stdout: &mut tokio::io::Stdout) -> Result<()> {
        let glyphs = visible_glyphs(self.session.look()?);
        let mut frame = render_map(self.session.state(), &glyphs);
        frame.push('\n');

        let log = self.session.messages();
        let fresh = log.posted().saturating_sub(self.shown).min(log.len());
        let mut recent: Vec<&str> = log.recent(fresh).map(|entry| entry.text.as_str()).collect();
        recent.reverse();
        for text in recent {
            frame.push_str(text);
            frame.push('\n');
        }
        self.shown = log.posted();

        stdout.write_all(frame.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}
