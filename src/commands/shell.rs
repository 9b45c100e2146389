//! Interactive shell
//!
//! Reads lines with rustyline and drives a [`ViewRouter`]. The shell keeps a
//! single studio session and a single assistant session for its lifetime.

use super::browse::render_chips;
use super::generate::generate_with_narration;
use super::key::{prompt_for_key, select_key};
use super::library::delete_from_library;
use super::shell_commands::{parse_shell_command, print_help, ShellCommand};
use super::{print_chat_message, print_video_details, print_video_table, AppContext};
use crate::assistant::{summarize, AssistantSession};
use crate::catalog::{builtin_catalog, find_video};
use crate::error::Result;
use crate::studio::Studio;
use crate::view::{AppView, ViewRouter};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

struct Shell<'a> {
    ctx: &'a mut AppContext,
    router: ViewRouter,
    studio: Studio,
    assistant: AssistantSession,
}

/// Start the interactive shell
pub async fn run_shell(ctx: &mut AppContext) -> Result<()> {
    tracing::info!("Starting interactive shell");
    ctx.load_stored_key();

    let studio = ctx.studio();
    let assistant = ctx.assistant();
    let mut shell = Shell {
        ctx,
        router: ViewRouter::new(),
        studio,
        assistant,
    };

    let mut rl = DefaultEditor::new()?;
    print_welcome_banner();
    if let Some(greeting) = shell.assistant.messages().first() {
        print_chat_message(greeting, 0);
    }
    shell.render()?;

    loop {
        let prompt = format!("{} >> ", shell.router.view().colored_tag());
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                let command = match parse_shell_command(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}\n", e.to_string().red());
                        continue;
                    }
                };

                if command == ShellCommand::Exit {
                    break;
                }
                if let Err(e) = shell.execute(command, trimmed).await {
                    println!("{}\n", format!("Error: {:#}", e).red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

impl Shell<'_> {
    async fn execute(&mut self, command: ShellCommand, raw: &str) -> Result<()> {
        match command {
            ShellCommand::Navigate(view) => {
                self.router.navigate(view);
                self.render()?;
            }
            ShellCommand::Explore(category) => {
                match category {
                    Some(name) => {
                        self.router.choose_category(&name)?;
                    }
                    None => self.router.navigate(AppView::Explore),
                }
                self.render()?;
            }
            ShellCommand::Search(query) => {
                self.router.set_query(query);
                if !matches!(self.router.view(), AppView::Home | AppView::Explore) {
                    self.router.navigate(AppView::Home);
                }
                self.render()?;
            }
            ShellCommand::Play(id) => self.play(&id).await?,
            ShellCommand::Generate(prompt) => self.generate(&prompt).await?,
            ShellCommand::Ask(text) => self.ask(&text).await,
            ShellCommand::Delete(id) => {
                delete_from_library(self.ctx, &id)?;
                println!("{}", format!("Deleted video {}", id).green());
                if self.router.view() == AppView::Library {
                    self.render()?;
                }
            }
            ShellCommand::SelectKey => {
                if let Some(key) = prompt_for_key()? {
                    select_key(self.ctx, key);
                    self.studio.select_credential();
                    println!("{}\n", "API key selected.".green());
                }
            }
            ShellCommand::ShowStatus => self.print_status(),
            ShellCommand::Help => print_help(),
            ShellCommand::None => {
                if self.router.view() == AppView::Studio {
                    self.generate(raw).await?;
                } else {
                    self.ask(raw).await;
                }
            }
            ShellCommand::Exit => {}
        }
        Ok(())
    }

    fn render(&self) -> Result<()> {
        let view = self.router.view();
        println!("\n{} {}", view.colored_tag(), view.description().bold());

        match view {
            AppView::Home | AppView::Explore => {
                if view == AppView::Explore {
                    let active = crate::catalog::resolve_category(self.router.query());
                    println!("{}", render_chips(active));
                }
                if !self.router.query().is_empty() {
                    println!("Search: \"{}\"", self.router.query().cyan());
                }
                let videos = self
                    .router
                    .visible(&self.ctx.library.get_videos()?, &builtin_catalog());
                if videos.is_empty() {
                    println!("{}", "No videos match your search.".yellow());
                } else {
                    print_video_table(&videos);
                }
            }
            AppView::Library => {
                let videos = self.ctx.library.get_videos()?;
                if videos.is_empty() {
                    println!(
                        "{}",
                        "Your library is empty. Visit /studio to create a video.".yellow()
                    );
                } else {
                    print_video_table(&videos);
                }
            }
            AppView::Studio => {
                let state = self.studio.state();
                if !self.studio.credential_selected() {
                    println!(
                        "{}",
                        "Select an API key from a paid project with /key to start creating."
                            .yellow()
                    );
                }
                if !state.status.is_empty() {
                    println!("Last run: {}", state.status);
                }
                println!("Describe a cinematic scene to generate a video.");
            }
            AppView::Playing => match self.router.selected() {
                Some(video) => print_video_details(video),
                None => println!("{}", "Nothing selected. Use /play <id>.".yellow()),
            },
        }
        println!();
        Ok(())
    }

    async fn play(&mut self, id: &str) -> Result<()> {
        let feed = self.ctx.feed()?;
        let video = find_video(&feed, id)
            .cloned()
            .ok_or_else(|| crate::error::NovastreamError::NotFound(id.to_string()))?;
        self.router.select(video.clone());
        self.render()?;

        println!("{}", "AI Smart Summary".magenta().bold());
        if self.ctx.api_key.is_set() {
            let summary = summarize(
                self.ctx.backends.chat.as_ref(),
                &self.ctx.config.gemini.summary_model,
                &video,
            )
            .await;
            println!("{}\n", summary);
        } else {
            println!("{}\n", "Select an API key with /key to enable AI insights.".yellow());
        }
        Ok(())
    }

    async fn generate(&mut self, prompt: &str) -> Result<()> {
        self.router.navigate(AppView::Studio);
        if !self.studio.credential_selected() {
            println!(
                "{}\n",
                "Select an API key from a paid project with /key first.".yellow()
            );
            return Ok(());
        }

        let video = generate_with_narration(&mut self.studio, prompt).await?;
        println!("{} {}\n", "Saved to your library as".bold(), video.id.cyan());
        Ok(())
    }

    async fn ask(&mut self, text: &str) {
        let max_sources = self.assistant.max_displayed_sources();
        println!("{}", "thinking...".dimmed());
        if let Some(reply) = self.assistant.send(text).await {
            print_chat_message(reply, max_sources);
        }
        println!();
    }

    fn print_status(&self) {
        println!("\n{}", "Session Status".bold());
        println!("  View:        {}", self.router.view().colored_tag());
        let query = if self.router.query().is_empty() {
            "-"
        } else {
            self.router.query()
        };
        println!("  Search:      {}", query);
        if let Some(video) = self.router.selected() {
            println!("  Selected:    {} ({})", video.title, video.id);
        }
        let key = match (&self.ctx.key_source, self.studio.credential_selected()) {
            (Some(source), true) => format!("selected (from {})", source).green().to_string(),
            _ => "not selected".yellow().to_string(),
        };
        println!("  API key:     {}", key);
        println!("  Messages:    {}", self.assistant.messages().len());
        println!();
    }
}

fn print_welcome_banner() {
    println!();
    println!("{}", "NovaStream".magenta().bold());
    println!("Type {} for commands, {} to leave.", "/help".cyan(), "exit".cyan());
}
