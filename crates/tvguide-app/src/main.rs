//! tvguide terminal entry point.
//!
//! Usage: `tvguide [LISTING] [CONFIG]`. Without a listing a generated demo
//! guide is shown. The grid is redrawn after every command read from stdin.

mod demo;
mod input;
mod render;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use chrono::Local;

use input::Command;
use render::TextHost;
use tvguide_core::config::GuideConfig;
use tvguide_core::{
    Activation, DataSource, GuideResponse, GuideSession, Listing, MemoryNotificationStore,
    MemorySource, MenuRequest, RenderHost,
};

type Session = GuideSession<MemorySource, MemoryNotificationStore, TextHost>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let listing_path = args.next();
    let config = match args.next() {
        Some(path) => GuideConfig::load(Path::new(&path))?,
        None => GuideConfig::default(),
    };

    let now = Local::now().naive_local();
    let listing = match &listing_path {
        Some(path) => Listing::load(Path::new(path))?,
        None => {
            log::info!("No listing given, using demo guide");
            demo::listing(now)
        },
    };
    let source = MemorySource::from_listing(listing)?;
    let host = TextHost::new(&config);
    let mut session = GuideSession::new(source, MemoryNotificationStore::new(), host, config, now)?;
    session.on_initial_layout()?;

    let mut stdout = io::stdout();
    redraw(&mut stdout, &session)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let event = match input::parse_command(&line) {
            Some(Command::Input(event)) => event,
            Some(command) => {
                change_stream(&mut stdout, &mut session, command)?;
                redraw(&mut stdout, &session)?;
                continue;
            },
            None => {
                writeln!(stdout, "{}", input::HELP)?;
                continue;
            },
        };
        session.set_now(Local::now().naive_local());
        match session.handle_input(event) {
            Ok(GuideResponse::Close) => break,
            Ok(GuideResponse::Handled) => {},
            Ok(GuideResponse::Activated(Activation::Played(channel))) => {
                let url = session
                    .source()
                    .channels()
                    .ok()
                    .and_then(|all| all.into_iter().find(|c| c.id == channel))
                    .and_then(|c| session.source().stream_url(&c).map(str::to_string));
                writeln!(stdout, "Playing {channel} {}", url.unwrap_or_default())?;
            },
            Ok(GuideResponse::Activated(Activation::Menu(request))) => {
                writeln!(stdout, "{}", describe(&request))?;
            },
            Ok(GuideResponse::Menu(request)) => match session.on_reminder_toggle(request.cell) {
                Ok(_) => {
                    let verb = if request.offer_reminder { "Set" } else { "Cleared" };
                    writeln!(stdout, "{verb} reminder for {}", request.program.title)?;
                },
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => log::warn!("Reminder not changed: {e}"),
            },
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => log::warn!("{e}"),
        }
        redraw(&mut stdout, &session)?;
    }

    log::info!("Guide closed");
    Ok(())
}

fn redraw(out: &mut impl Write, session: &Session) -> io::Result<()> {
    writeln!(out, "\n{}\n> ", session.host().draw())?;
    out.flush()
}

/// Apply a stream command to the focused cell's channel.
fn change_stream(out: &mut impl Write, session: &mut Session, command: Command) -> Result<()> {
    let Some(cell) = session.host().focused() else {
        writeln!(out, "Nothing focused")?;
        return Ok(());
    };
    let outcome = match &command {
        Command::ChooseStream(url) => session.on_choose_stream(cell, url),
        Command::RemoveStream => session.on_remove_custom_stream(cell),
        Command::Input(_) => return Ok(()),
    };
    match outcome {
        Ok(true) => writeln!(out, "Channel is playable")?,
        Ok(false) => writeln!(out, "Channel has no stream")?,
        Err(e) if e.is_fatal() => return Err(e.into()),
        Err(e) => log::warn!("Stream not changed: {e}"),
    }
    Ok(())
}

fn describe(request: &MenuRequest) -> String {
    let program = &request.program;
    let reminder = if request.offer_reminder {
        "m: set reminder"
    } else {
        "m: clear reminder"
    };
    let stream = match &request.custom_stream {
        Some(url) => format!("x: remove stream {url}"),
        None => "s <url>: choose stream".to_string(),
    };
    format!(
        "{} on {} ({})  [{reminder}]  [{stream}]",
        program.title,
        program.channel.title,
        program.time_range_label()
    )
}
