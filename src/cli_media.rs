use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tokio::runtime::Runtime;

use media_catalog_server::client::{
    format_media_details, format_media_line, ClientError, MediaApiClient,
};
use media_catalog_server::media_store::{CreateMediaRequest, MediaRecord};

mod cli_style;
use cli_style::get_styles;

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

#[derive(Parser, Debug)]
#[command(styles = get_styles())]
struct CliArgs {
    /// Base URL of the media server.
    #[clap(long, default_value = "http://127.0.0.1:5000")]
    pub server_url: String,
}

#[derive(Parser)]
#[command(styles = get_styles(), name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Shows every media item.
    List,

    /// Shows the items of one category (Book, Film or Magazine).
    Category { category: String },

    /// Shows the items whose name is exactly the given one, ignoring case.
    Search { name: String },

    /// Shows all the fields of an item.
    Show { id: String },

    /// Creates a new item. Quote values containing spaces.
    Create {
        name: String,
        author: String,
        publication_date: String,
        category: String,
    },

    /// Deletes an item.
    Delete { id: String },

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

const PROMPT: &str = ">> ";

fn print_records(records: &[MediaRecord]) {
    if records.is_empty() {
        println!("No media found.");
        return;
    }
    for record in records {
        println!("[{}] {}", record.id, format_media_line(record));
    }
}

fn describe_error(err: ClientError) -> String {
    match err {
        ClientError::Api { message, .. } => message,
        other => other.to_string(),
    }
}

fn execute_command(
    line: String,
    client: &MediaApiClient,
    runtime: &Runtime,
) -> CommandExecutionResult {
    if line.trim().is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    let cli = match cli {
        Ok(cli) => cli,
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            return CommandExecutionResult::Ok;
        }
    };

    println!("{} {}", PROMPT, &line);
    let outcome = match cli.command {
        InnerCommand::List => runtime.block_on(client.list_all()).map(|r| print_records(&r)),
        InnerCommand::Category { category } => runtime
            .block_on(client.list_by_category(&category))
            .map(|r| print_records(&r)),
        InnerCommand::Search { name } => runtime
            .block_on(client.search_by_name(&name))
            .map(|r| print_records(&r)),
        InnerCommand::Show { id } => runtime
            .block_on(client.get_media(&id))
            .map(|record| println!("{}", format_media_details(&record))),
        InnerCommand::Create {
            name,
            author,
            publication_date,
            category,
        } => {
            let request = CreateMediaRequest::new(name, author, publication_date, category);
            runtime
                .block_on(client.create_media(&request))
                .map(|record| println!("Created [{}] {}", record.id, format_media_line(&record)))
        }
        InnerCommand::Delete { id } => runtime
            .block_on(client.delete_media(&id))
            .map(|deleted| println!("Deleted {}", deleted)),
        InnerCommand::Exit => return CommandExecutionResult::Exit,
    };

    match outcome {
        Ok(()) => CommandExecutionResult::Ok,
        Err(err) => CommandExecutionResult::Error(describe_error(err)),
    }
}

#[derive(rustyline_derive::Hinter)]
struct CommandsHelper {
    commands_names: Vec<String>,
}

impl CommandsHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        CommandsHelper { commands_names }
    }
}

impl Completer for CommandsHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for CommandsHelper {}
impl Validator for CommandsHelper {}
impl Helper for CommandsHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let client = MediaApiClient::new(cli_args.server_url.clone())?;
    let runtime = Runtime::new()?;

    println!("Talking to media server at {}", client.base_url());
    InnerCli::command().print_long_help()?;

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<CommandsHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(CommandsHelper::new()));

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &client, &runtime) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => {
                        eprintln!("Error: {}", err);
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }
    Ok(())
}
