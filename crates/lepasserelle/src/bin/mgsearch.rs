// mgsearch CLI entry point

fn main() -> anyhow::Result<()> {
    lepasserelle::cli::main()
}
