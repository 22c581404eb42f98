//! Command-line harness: load a raw 6502 image (or assemble a source file) and run it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::{info, LevelFilter};

use em6502::assembler::Segment;
use em6502::{assemble_at, AssemblerOutput, MemoryRegion, CPU};

/// Zero-page byte the demo programs read as a random number.
const RANDOM_BYTE: u16 = 0x00FE;

/// Zero-page byte holding the last key pressed.
const LAST_KEY: u16 = 0x00FF;

/// Screen memory of the 32x32 demo display.
const SCREEN: MemoryRegion = MemoryRegion {
    low: 0x0200,
    high: 0x05FF,
};

#[derive(Parser, Debug)]
#[command(
    name = "run6502",
    version,
    about = "Run a raw 6502 image or assembly source in a flat 64KB address space"
)]
struct Cli {
    /// Headerless machine-code image, or assembly source ending in .asm or .s
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    #[arg(
        short = 'o',
        long = "offset",
        value_name = "HEX",
        default_value = "0600",
        value_parser = parse_hex_u16,
        long_help = "Load address of the image and initial PC (4 hex digits). Defaults to 0600. \
                     For assembly sources this is the address before any .org."
    )]
    offset: u16,

    #[arg(
        short = 'n',
        long = "max-instructions",
        value_name = "N",
        default_value_t = 9999,
        long_help = "Stop after N instructions. 0 runs until an illegal opcode is reached."
    )]
    max_instructions: u64,

    #[arg(
        short = 'w',
        long = "watch",
        value_name = "LOW:HIGH",
        value_parser = parse_region,
        action = ArgAction::Append,
        long_help = "Report every store into LOW..=HIGH (hex, repeatable, at most 5)."
    )]
    watch: Vec<MemoryRegion>,

    #[arg(
        long = "stop-on-brk",
        action = ArgAction::SetTrue,
        long_help = "Stop before executing a BRK instead of taking the interrupt."
    )]
    stop_on_brk: bool,

    #[arg(
        short = 't',
        long = "trace",
        action = ArgAction::SetTrue,
        long_help = "Log every executed instruction (same as RUST_LOG=em6502=trace)."
    )]
    trace: bool,
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let digits = s.trim_start_matches('$').trim_start_matches("0x");
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex address '{}': {}", s, e))
}

fn parse_region(s: &str) -> Result<MemoryRegion, String> {
    let (low, high) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LOW:HIGH, got '{}'", s))?;
    Ok(MemoryRegion::new(parse_hex_u16(low)?, parse_hex_u16(high)?))
}

fn init_logging(trace: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if trace {
        builder.filter_module("em6502", LevelFilter::Trace);
    }
    builder.init();
}

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("asm") || ext.eq_ignore_ascii_case("s"))
}

/// Read the image, assembling it first when it is a source file.
fn load_image(path: &Path, offset: u16) -> Result<AssemblerOutput, Box<dyn std::error::Error>> {
    if is_source(path) {
        let source = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        return assemble_at(&source, offset).map_err(|errors| -> Box<dyn std::error::Error> {
            let report: Vec<String> = errors
                .iter()
                .map(|e| format!("{}:{}", path.display(), e))
                .collect();
            report.join("\n").into()
        });
    }

    let image = fs::read(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;

    let available = 0x10000 - offset as usize;
    if image.len() > available {
        return Err(format!(
            "{} is {} bytes but only {} fit at ${:04X}",
            path.display(),
            image.len(),
            available,
            offset
        )
        .into());
    }

    Ok(AssemblerOutput {
        segments: vec![Segment {
            address: offset,
            bytes: image,
        }],
        symbol_table: Vec::new(),
    })
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let image = load_image(&cli.image, cli.offset)?;

    let mut cpu = CPU::default();
    cpu.initialize();

    // Demo programs expect a quiet keyboard, a zero random byte and a blank screen
    cpu.write(RANDOM_BYTE, 0x00);
    cpu.write(LAST_KEY, 0x00);
    for addr in SCREEN.low..=SCREEN.high {
        cpu.write(addr, 0x00);
    }

    for region in &cli.watch {
        let region = *region;
        cpu.register_write_listener(region, move |addr: u16| {
            println!("[{}] store at ${:04X}", region, addr);
        })?;
    }

    image.load_into(&mut cpu);
    info!(
        "Running {} ({} bytes) from ${:04X}",
        cli.image.display(),
        image.bytes().len(),
        cpu.pc()
    );

    let budget = (cli.max_instructions > 0).then_some(cli.max_instructions);
    let result = if cli.stop_on_brk {
        cpu.run_until(budget, |cpu| cpu.read(cpu.pc()) == 0x00)
    } else {
        cpu.run(budget)
    };

    let outcome = result.map(|executed| {
        println!("Executed {} instructions", executed);
    });

    println!(
        "A=${:02X} X=${:02X} Y=${:02X} SP=${:02X} PC=${:04X} P=${:02X} cycles={}",
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        cpu.pc(),
        cpu.status(),
        cpu.cycles()
    );

    outcome.map_err(Into::into)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.trace);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
