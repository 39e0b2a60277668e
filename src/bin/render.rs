use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

use structopt::StructOpt;

use mandelband::session::{check_thread_count, RenderConfig, RenderSession};
use mandelband::tga;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mandelband",
    about = "Parallelised Mandelbrot renderer with a progress bar"
)]
struct Opt {
    #[structopt(long, default_value = "1920")]
    width: usize,

    #[structopt(long, default_value = "1200")]
    height: usize,

    #[structopt(short = "i", long, default_value = "500")]
    max_iterations: u16,

    /// Worker thread count; must divide the height evenly. Prompted for
    /// interactively when absent.
    #[structopt(short, long)]
    threads: Option<usize>,

    #[structopt(short, long, default_value = "mandelbrot.tga", parse(from_os_str))]
    output: PathBuf,
}

fn default_thread_count() -> usize {
    let cores = num_cpus::get();
    if cores == 0 {
        8
    } else {
        cores
    }
}

/// Reads a thread count from the console, re-prompting until it produces
/// uniform bands. Empty input falls back to the core count.
fn prompt_thread_count(height: usize) -> usize {
    let mut first = true;
    loop {
        if first {
            print!("Enter thread count (leave empty to use the number of CPU cores): ");
        } else {
            print!("Can't distribute Mandelbrot fragments evenly. Try again: ");
        }
        io::stdout().flush().expect("failed to flush stdout");
        first = false;

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return default_thread_count();
        }
        let input = input.trim();
        let threads = if input.is_empty() {
            default_thread_count()
        } else {
            match input.parse::<usize>() {
                Ok(n) => n,
                Err(_) => continue,
            }
        };
        if check_thread_count(threads, height).is_ok() {
            return threads;
        }
    }
}

fn main() {
    let opt = Opt::from_args();
    println!("PARALLELISED MANDELBROT\n");

    let threads = match opt.threads {
        Some(n) => n,
        None => prompt_thread_count(opt.height),
    };

    let config = RenderConfig::new(opt.width, opt.height, opt.max_iterations, threads);
    let session = match RenderSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            exit(1);
        }
    };

    println!("\nCalculating Mandelbrot with {} threads.", threads);
    println!("Please wait...\n");

    let start = Instant::now();
    let raster = session.render();
    let elapsed = start.elapsed();

    println!("\nDone!");
    println!(
        "\nComputing the entire Mandelbrot set took {} ms.",
        elapsed.as_millis()
    );

    if let Err(e) = tga::save(&raster, &opt.output) {
        eprintln!("Error writing to {}: {}", opt.output.display(), e);
        exit(1);
    }
}
