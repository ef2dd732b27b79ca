fn main() -> anyhow::Result<()> {
    kartcrawl::cli::run()?;
    Ok(())
}
