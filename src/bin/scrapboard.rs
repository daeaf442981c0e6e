// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use cheongyak_scrap::{
    AuthGate, AuthStore, BoardEvent, BoardView, DiagnosticLog, Error, FileSessionStorage, GateOutcome,
    HttpNotifier, Role, ScrapBoard, ScrapConfig, ScrapStore, SessionToken, SupabaseScraps,
    UserId, UserSession, YoutubeVideos,
};
use std::process::ExitCode;
use std::sync::Arc;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "scrapboard", about = "Browse and scrap 청약 videos")]
struct Options {
    /// TOML configuration file, looked up in the home directory and then here.
    #[structopt(long, default_value = "scrapboard.toml")]
    config: String,
    /// Echo diagnostics to stdout.
    #[structopt(long)]
    debug: bool,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
struct User {
    /// ID of the signed in user.
    #[structopt(long)]
    user_id: Option<String>,
    /// Role of the signed in user, for example `admin`.
    #[structopt(long, default_value = "user")]
    role: Role,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Store the invite code.
    Login {
        #[structopt(long)]
        invite_code: String,
    },
    /// Forget the invite code.
    Logout,
    /// Search and list videos.
    Search {
        #[structopt(long)]
        query: Option<String>,
        #[structopt(long)]
        scrapped_only: bool,
        #[structopt(flatten)]
        user: User,
    },
    /// Search, then announce the newest video (admins only).
    Notify {
        #[structopt(long)]
        query: Option<String>,
        #[structopt(flatten)]
        user: User,
    },
    /// Search, then scrap or unscrap one of the results.
    Scrap {
        #[structopt(long)]
        query: Option<String>,
        #[structopt(long)]
        id: String,
    },
}

fn print_view(board: &ScrapBoard, view: &BoardView) {
    println!("query: {} ({})", view.query, view.mode_label());
    if view.no_results {
        println!("no videos found");
    }
    let scraps = board.scraps().scraps();
    for id in view.filter_ids.iter().flatten() {
        if let Some(video) = scraps.iter().find(|v| &v.id == id) {
            let mark = if board.scraps().is_scrapped(id) { "*" } else { " " };
            println!("{mark} {id}  {}  {}", video.upload_date, video.title);
        }
    }
    if view.show_notify_button {
        println!("new videos found: run `scrapboard notify` to announce them");
    }
}

/// Print every warning to stderr. Any warning makes the command fail.
fn report_warnings(loggers: &[&DiagnosticLog]) -> Result<(), Error> {
    let warnings: Vec<String> = loggers.iter().flat_map(|log| log.warnings()).collect();
    if warnings.is_empty() {
        return Ok(());
    }
    for warning in &warnings {
        eprintln!("warning: {warning}");
    }
    Err(Error::String(format!("{} operation(s) failed", warnings.len())))
}

fn board_for(
    scrap_config: &ScrapConfig,
    user: Option<User>,
    scraps: ScrapStore,
) -> Result<ScrapBoard, Error> {
    let auth = AuthStore::default();
    if let Some(User {
        user_id: Some(id),
        role,
    }) = user
    {
        auth.sign_in(UserSession {
            id: UserId(id),
            role,
        });
    }
    ScrapBoard::from_config(
        scrap_config,
        Arc::new(YoutubeVideos::new(scrap_config)?),
        scraps,
        auth,
        Arc::new(HttpNotifier::new(scrap_config)?),
    )
}

async fn run(options: Options) -> Result<(), Error> {
    let scrap_config = ScrapConfig::builder()
        .debug(options.debug)
        .toml_file(&options.config)
        .build()?;
    let gate = AuthGate::from_config(
        &scrap_config,
        Arc::new(FileSessionStorage::from_config(&scrap_config)?),
    )?;

    let command = match options.command {
        Command::Login { invite_code } => return gate.sign_in(&SessionToken(invite_code)),
        Command::Logout => return gate.sign_out(),
        command => match gate.guard(command) {
            GateOutcome::Render(command) => command,
            GateOutcome::Redirect(redirect) => {
                println!("not signed in: go to {} (scrapboard login)", redirect.to);
                return Ok(());
            }
        },
    };

    let scraps = ScrapStore::new(
        Arc::new(SupabaseScraps::new(&scrap_config)?),
        gate.logger().clone(),
    );
    match command {
        Command::Search {
            query,
            scrapped_only,
            user,
        } => {
            let mut board = board_for(&scrap_config, Some(user), scraps)?;
            if let Some(query) = query {
                board.set_query(query);
            }
            board.mount().await;
            if scrapped_only {
                board.toggle_scrapped_only();
            }
            print_view(&board, &board.view());
            report_warnings(&[board.logger(), board.scraps().logger()])?;
        }
        Command::Notify { query, user } => {
            let mut board = board_for(&scrap_config, Some(user), scraps)?;
            let mut events = board.subscribe();
            if let Some(query) = query {
                board.set_query(query);
            }
            board.mount().await;
            if !board.state().show_notify_button {
                println!("nothing to announce");
            }
            board.send_notification().await;
            while let Ok(event) = events.try_recv() {
                if let BoardEvent::Alert(message) = event {
                    println!("{message}");
                }
            }
            report_warnings(&[board.logger(), board.scraps().logger()])?;
        }
        Command::Scrap { query, id } => {
            let mut board = board_for(&scrap_config, None, scraps)?;
            if let Some(query) = query {
                board.set_query(query);
            }
            board.mount().await;
            report_warnings(&[board.logger(), board.scraps().logger()])?;
            let Some(video) = board.scraps().scraps().into_iter().find(|v| v.id == *id) else {
                return Err(Error::String(format!("{id}: not in the search results")));
            };
            let scrapped = board.scraps().toggle_scrap(&video).await?;
            println!("{id}: {}", if scrapped { "scrapped" } else { "unscrapped" });
        }
        Command::Login { .. } | Command::Logout => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Options::from_args()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
