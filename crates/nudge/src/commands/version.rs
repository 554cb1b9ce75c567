pub fn run() -> anyhow::Result<()> {
    println!("nudge {}", env!("CARGO_PKG_VERSION"));
    println!("Retention prompt scheduling for interactive surfaces");
    Ok(())
}
