use anyhow::Context;
use bittab::commands::{
    BitOp, BitsCommand, BitsConfig, Command, OpCommand, OpConfig, TableCommand, TableConfig,
    TableFormat,
};
use bittab::{parse_number, ColorMode, InputSource, Orientation};
use clap::{Parser, Subcommand};
use termcolor::StandardStream;
use tracing::Level;

#[derive(Parser)]
#[command(name = "bittab")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Color output (always, auto, never)
    #[arg(long, global = true, default_value = "auto")]
    color: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a bit sequence and print it in other formats
    Bits {
        /// Value to parse (e.g. 0b1010, 0xA, 10)
        value: String,

        /// Input format (bin, hex, int, bytes, list, auto)
        #[arg(long = "from", default_value = "auto")]
        input_format: String,

        /// Width in bits (decimal or 0x hex)
        #[arg(short, long)]
        len: Option<String>,

        /// Output format, may be repeated (bin, hex, int, bytes, list, repr)
        #[arg(long = "to", default_value = "bin")]
        formats: Vec<String>,
    },

    /// Combine two bit sequences (and, or) or shift one (shl, shr)
    Op {
        /// Operation: and, or, shl, shr
        #[arg(value_parser = ["and", "or", "shl", "shr"])]
        operation: String,

        /// Left operand
        lhs: String,

        /// Right operand, or the shift amount
        rhs: String,

        /// Input format for the operands
        #[arg(long = "from", default_value = "auto")]
        input_format: String,

        /// Output format for the result
        #[arg(short, long, default_value = "bin")]
        format: String,
    },

    /// Render JSON or YAML data as a table
    Table {
        /// Input file (use '-' for stdin)
        #[arg(short, long)]
        input: Option<String>,

        /// Input document format (json, yaml)
        #[arg(long, default_value = "json")]
        data_format: String,

        /// Output format (text, html)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// HTML orientation (auto, horizontal, vertical)
        #[arg(long, default_value = "auto")]
        orientation: String,

        /// Levels of nested data rendered as tables
        #[arg(long, default_value = "1")]
        max_depth: usize,

        /// Truncate text cells longer than this
        #[arg(long)]
        maxlen: Option<usize>,

        /// Omit the header row
        #[arg(long)]
        no_headers: bool,

        /// Unwrap {"data": ..., "metadata": ...} and render the metadata
        #[arg(long)]
        metadata: bool,

        /// Emit HTML on a single line
        #[arg(long)]
        compact: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let color = ColorMode::from_str(&cli.color)?;
    let mut stdout = StandardStream::stdout(color.color_choice());

    let command: Box<dyn Command> = match cli.command {
        Commands::Bits {
            value,
            input_format,
            len,
            formats,
        } => {
            let len = len
                .as_deref()
                .map(parse_number)
                .transpose()
                .context("invalid --len")?;
            Box::new(BitsCommand::new(BitsConfig {
                value,
                input_format,
                len,
                formats,
            }))
        }
        Commands::Op {
            operation,
            lhs,
            rhs,
            input_format,
            format,
        } => Box::new(OpCommand::new(OpConfig {
            op: BitOp::from_str(&operation)?,
            lhs,
            rhs,
            input_format,
            format,
        })),
        Commands::Table {
            input,
            data_format,
            format,
            orientation,
            max_depth,
            maxlen,
            no_headers,
            metadata,
            compact,
        } => {
            let source = InputSource::from_arg(input.as_deref());
            Box::new(TableCommand::new(TableConfig {
                source,
                data_format,
                format: TableFormat::from_str(&format)?,
                orientation: Orientation::from_str(&orientation)?,
                max_depth,
                maxlen,
                with_headers: !no_headers,
                with_metadata: metadata,
                with_newlines: !compact,
            }))
        }
    };

    command
        .execute(&mut stdout)
        .context("command failed")?;
    Ok(())
}
