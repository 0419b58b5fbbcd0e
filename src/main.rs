fn main() -> anyhow::Result<()> {
    theme_viewer::run()?;
    Ok(())
}
