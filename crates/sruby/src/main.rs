use sruby::{cli::Args, profile::Profiler};

fn main() {
    env_logger::init();
    let args = Args::from_cli();
    let mut profiler = Profiler::new(args.profile);
    let r = sruby::run(&args, &mut profiler, &mut std::io::stdout().lock());
    if let Err(e) = profiler.report(&mut std::io::stdout()) {
        eprintln!("Failed to write profile report: {e}");
    }
    if let Err(e) = r {
        eprintln!("{:?}", e);
        std::process::exit(1)
    }
}
