use std::ffi::OsString;
use std::io::{self, BufRead, ErrorKind, Write};

use marquee_error::{MarqueeError, Result};
use marquee_store::{Database, Lineup};
use marquee_types::{parse_record, MovieRecord};
use tracing::warn;

const DEFAULT_DB_PATH: &str = "MovieDatabase.txt";
const BEGIN_DAY: &str = "begin day";
const END_DAY: &str = "end day";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    db_path: String,
    show_help: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let exit_code = run(std::env::args_os(), &mut input, &mut stdout, &mut stderr);
    drop(input);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run<I, R, W, E>(args: I, input: &mut R, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(message) => {
            let _ = writeln!(err, "error: {message}");
            let _ = write_usage(err);
            return 2;
        }
    };

    if options.show_help {
        if write_usage(out).is_err() {
            return 1;
        }
        return 0;
    }

    let database = Database::new(&options.db_path);
    let mut lineup = Lineup::new();

    match database.load_lines() {
        Ok(lines) => {
            lineup.load_from_lines(lines.iter().map(String::as_str));
        }
        Err(error @ MarqueeError::DatabaseUnavailable { .. }) => {
            warn!(%error, "starting with an empty lineup");
            let _ = writeln!(
                out,
                "Movie database file not found; starting with an empty lineup."
            );
        }
        Err(error) => {
            let _ = writeln!(err, "error: {error}");
            return 1;
        }
    }

    // Normalize the file right away so a hand-edited database is rewritten
    // in canonical form before any sales happen.
    if let Err(error) = database.save(&lineup) {
        let _ = writeln!(err, "error: {error}");
        return 1;
    }

    let _ = write_sales_summaries(&lineup, out);
    let _ = writeln!(out);

    if let Err(error) = swap_phase(&database, &mut lineup, input, out, err) {
        let _ = writeln!(err, "error: {error}");
        return 1;
    }
    if let Err(error) = sale_phase(&database, &mut lineup, input, out, err) {
        let _ = writeln!(err, "error: {error}");
        return 1;
    }

    // One more save before closing out the day.
    if let Err(error) = database.save(&lineup) {
        let _ = writeln!(err, "error: {error}");
        return 1;
    }

    let _ = writeln!(out, "\nEnd of day report:");
    let _ = write_sales_summaries(&lineup, out);

    0
}

fn parse_args<I>(args: I) -> std::result::Result<CliOptions, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let _argv0 = iter.next();

    let mut db_path = String::from(DEFAULT_DB_PATH);
    let mut has_path = false;
    let mut show_help = false;

    for argument in iter {
        let arg = argument.to_string_lossy();
        let arg_str = arg.as_ref();

        match arg_str {
            "-h" | "--help" => {
                show_help = true;
            }
            _ => {
                if arg_str.starts_with('-') {
                    return Err(format!("unknown option `{arg_str}`"));
                }
                if has_path {
                    return Err(String::from(
                        "too many positional arguments; expected at most one DB path",
                    ));
                }
                arg_str.clone_into(&mut db_path);
                has_path = true;
            }
        }
    }

    Ok(CliOptions { db_path, show_help })
}

/// Operator phase: swap showings until `begin day` (or EOF).
fn swap_phase<R, W, E>(
    database: &Database,
    lineup: &mut Lineup,
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let _ = writeln!(out, "Before the day begins, you may swap any movie you like.");
    let _ = writeln!(
        out,
        "To swap a movie, enter: \"swap;[old movie];[new movie];[tickets available]\""
    );
    if let Some(movie) = lineup.list().next() {
        let _ = writeln!(out, "For example, try \"swap;{};Alien;30\"", movie.name);
    }
    let _ = writeln!(
        out,
        "To finish swapping and begin sales, enter \"{BEGIN_DAY}\""
    );
    let _ = out.flush();

    let mut buffer = String::new();
    while let Some(line) = read_line(input, &mut buffer)? {
        if line == BEGIN_DAY {
            break;
        }
        if line.split(';').next() != Some("swap") {
            // Anything that is not a swap command is ignored, not an error.
            continue;
        }
        match parse_swap_command(&line) {
            Ok((outgoing, incoming)) => {
                let incoming_name = incoming.name.clone();
                let _outgoing_record = lineup.swap(&outgoing, incoming);
                let _ = writeln!(
                    out,
                    "**{outgoing} has been swapped with {incoming_name}**\n"
                );
                let _ = write_sales_summaries(lineup, out);
                let _ = writeln!(out);
                let _ = out.flush();
                database.save(lineup)?;
            }
            Err(error) => report_recoverable(err, &error),
        }
    }
    Ok(())
}

/// Customer phase: sell tickets until `end day` (or EOF).
fn sale_phase<R, W, E>(
    database: &Database,
    lineup: &mut Lineup,
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let _ = writeln!(out, "\nBeginning day. To end day, type \"{END_DAY}\"\n");
    let _ = write_availability(lineup, out);
    let _ = writeln!(
        out,
        "\nTo purchase a ticket, enter: \"buy;[Movie Name];[Number of tickets]\""
    );
    if let Some(movie) = lineup.list().next() {
        let _ = writeln!(out, "For example, try \"buy;{};4\"", movie.name);
    }
    let _ = out.flush();

    let mut buffer = String::new();
    while let Some(line) = read_line(input, &mut buffer)? {
        if line == END_DAY {
            break;
        }
        if line.split(';').next() != Some("buy") {
            continue;
        }
        let (name, quantity) = match parse_buy_command(&line) {
            Ok(parsed) => parsed,
            Err(error) => {
                report_recoverable(err, &error);
                continue;
            }
        };
        match lineup.sell_tickets(&name, quantity) {
            Ok(_remaining) => {
                let _ = writeln!(out, "{quantity} tickets were just sold for {name}");
                database.save(lineup)?;
                let _ = writeln!(out);
                let _ = write_availability(lineup, out);
                let _ = writeln!(out);
                let _ = out.flush();
            }
            // A bad purchase must not end the sales session.
            Err(error) if error.is_recoverable() => report_recoverable(err, &error),
            Err(error) => return Err(error),
        }
    }
    Ok(())
}

/// Read one line, stripped of its line ending. `None` means EOF.
fn read_line<R: BufRead>(input: &mut R, buffer: &mut String) -> io::Result<Option<String>> {
    loop {
        buffer.clear();
        match input.read_line(buffer) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buffer.trim_end_matches(['\n', '\r']).to_owned())),
            // Keep the session alive on Ctrl-C style interrupts.
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}

/// Parse `swap;<old>;<new>;<cap>` into the outgoing name and the fresh
/// incoming record.
///
/// The incoming fields are normalized to a `name;0;cap` database line and
/// handed to the record codec, so swap commands share the codec's
/// validation. New movies always start with zero sales.
fn parse_swap_command(line: &str) -> Result<(String, MovieRecord)> {
    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() < 4 {
        return Err(MarqueeError::malformed(format!(
            "swap commands are `swap;<old movie>;<new movie>;<tickets>`, got `{line}`"
        )));
    }
    let incoming = parse_record(&format!("{};0;{}", fields[2], fields[3]))?;
    Ok((fields[1].to_owned(), incoming))
}

/// Parse `buy;<movie>;<quantity>`.
fn parse_buy_command(line: &str) -> Result<(String, u32)> {
    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() < 3 {
        return Err(MarqueeError::malformed(format!(
            "buy commands are `buy;<movie>;<quantity>`, got `{line}`"
        )));
    }
    if fields[1].is_empty() {
        return Err(MarqueeError::malformed("empty movie name in buy command"));
    }
    let quantity = fields[2].parse::<u32>().map_err(|_| {
        MarqueeError::malformed(format!(
            "ticket quantity is not a non-negative integer: `{}`",
            fields[2]
        ))
    })?;
    Ok((fields[1].to_owned(), quantity))
}

fn report_recoverable<E: Write>(err: &mut E, error: &MarqueeError) {
    let _ = writeln!(err, "error: {error}");
    if let Some(hint) = error.suggestion() {
        let _ = writeln!(err, "hint: {hint}");
    }
}

fn write_sales_summaries<W: Write>(lineup: &Lineup, out: &mut W) -> io::Result<()> {
    for movie in lineup.list() {
        writeln!(out, "{movie}")?;
    }
    Ok(())
}

fn write_availability<W: Write>(lineup: &Lineup, out: &mut W) -> io::Result<()> {
    for movie in lineup.list() {
        writeln!(out, "{}", movie.availability_line())?;
    }
    Ok(())
}

fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Usage: marquee [DB_PATH]\n\
         \n\
         Runs one box office day over the given movie database file\n\
         (default: {DEFAULT_DB_PATH}). Records are `name;ticketsSold;maxTickets`.\n\
         \n\
         Swap phase commands:\n\
         \n\
         swap;<old movie>;<new movie>;<tickets>   replace a showing\n\
         {BEGIN_DAY}                                open ticket sales\n\
         \n\
         Sale phase commands:\n\
         \n\
         buy;<movie>;<quantity>                   sell tickets\n\
         {END_DAY}                                  close out the day\n",
    )
}
