//! Interactive mode: one owner of the search state, fetches running alongside.
//!
//! Every input line is a keystroke burst followed by a submit. Each accepted submit
//! spawns a fetch task into a `JoinSet`; the loop applies outcomes as they finish and the
//! ticket guard drops any that a later submit has superseded.

use std::{io::Write, sync::Arc};

use anyhow::Context;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    task::JoinSet,
};
use tracing::{debug, warn};
use weather_widget_core::{
    FetchError, FetchTicket, SearchState, Submission, WeatherResult, WeatherSource, render,
};

const QUIT: &str = ":q";
const SEPARATOR: &str = "----------------------------------------";

type Outcome = (FetchTicket, Result<WeatherResult, FetchError>);

pub async fn run<R, W>(source: Arc<dyn WeatherSource>, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut fetches: JoinSet<Outcome> = JoinSet::new();
    let mut lines = input.lines();
    let mut state = SearchState::new();
    let mut input_open = true;

    draw(&state, out)?;

    // Once input closes, keep going until outstanding fetches report back.
    while input_open || !fetches.is_empty() {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    input_open = false;
                    continue;
                };
                if line.trim() == QUIT {
                    break;
                }

                state.set_city_text(line);
                if let Submission::Fetch(ticket) = state.submit() {
                    debug!(seq = ticket.seq(), city = %ticket.city(), "spawning fetch");

                    let source = Arc::clone(&source);
                    fetches.spawn(async move {
                        let outcome = source.fetch(ticket.city()).await;
                        (ticket, outcome)
                    });
                }
                draw(&state, out)?;
            }
            Some(joined) = fetches.join_next(), if !fetches.is_empty() => {
                match joined {
                    Ok((ticket, outcome)) => {
                        if state.resolve_fetch(&ticket, outcome) {
                            draw(&state, out)?;
                        }
                    }
                    Err(err) => warn!(error = %err, "fetch task did not complete"),
                }
            }
        }
    }

    Ok(())
}

fn draw<W: Write>(state: &SearchState, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "{SEPARATOR}").context("Failed to write to stdout")?;
    write!(out, "{}", render(state)).context("Failed to write to stdout")?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}
