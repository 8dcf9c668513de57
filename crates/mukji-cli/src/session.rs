//! Line-oriented interactive session over stdin.

use mukji_core::{Geolocator, MapApp, PlaceSearch, ReverseGeocoder};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output;
use crate::terminal::TerminalMap;

const HELP: &str = "commands: recommend | locate | pick <n> | marker <n> | map | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionCommand {
    Recommend,
    Locate,
    /// 1-based entry of the place list.
    Pick(usize),
    /// 1-based displayed marker.
    Marker(usize),
    /// Click on empty map background.
    Map,
    Help,
    Quit,
}

impl SessionCommand {
    pub(crate) fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        let index = |arg: Option<&str>| -> Result<usize, String> {
            arg.and_then(|a| a.parse::<usize>().ok())
                .filter(|n| *n >= 1)
                .ok_or_else(|| format!("`{command}` needs a number starting at 1"))
        };

        let parsed = match command.as_str() {
            "recommend" | "r" => Self::Recommend,
            "locate" | "l" => Self::Locate,
            "pick" | "p" => Self::Pick(index(words.next())?),
            "marker" | "m" => Self::Marker(index(words.next())?),
            "map" => Self::Map,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            "" => return Err(HELP.to_owned()),
            other => return Err(format!("unknown command `{other}`; {HELP}")),
        };
        if words.next().is_some() {
            return Err(format!("too many arguments; {HELP}"));
        }
        Ok(parsed)
    }
}

/// Reads commands until `quit` or end of input.
pub(crate) async fn run_session<C, G>(
    app: &mut MapApp<TerminalMap>,
    client: &C,
    geolocator: &G,
) -> anyhow::Result<()>
where
    C: PlaceSearch + ReverseGeocoder,
    G: Geolocator,
{
    let mut rng = rand::rng();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", app.surface().render());
    println!("{HELP}");

    while let Some(line) = lines.next_line().await? {
        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            SessionCommand::Recommend => match app.recommend(client, &mut rng).await {
                Ok(places) => println!("{}", output::format_places(places)),
                Err(err) => crate::report(&err),
            },
            SessionCommand::Locate => {
                match app.move_to_current_location(geolocator, client).await {
                    Ok(point) => println!(
                        "{}",
                        output::format_location(
                            point,
                            app.state().place.current_location.as_deref()
                        )
                    ),
                    Err(err) => crate::report(&err),
                }
            }
            SessionCommand::Pick(n) => {
                if app.select_place(n - 1).is_none() {
                    eprintln!("no place #{n} on the list");
                }
            }
            SessionCommand::Marker(n) => match app.state().marker_at(n - 1) {
                Some(marker) => app.click_marker(marker),
                None => eprintln!("no marker #{n} on the map"),
            },
            SessionCommand::Map => app.click_map(),
            SessionCommand::Help => {
                println!("{HELP}");
                continue;
            }
            SessionCommand::Quit => break,
        }

        println!("{}", app.surface().render());
    }

    Ok(())
}
