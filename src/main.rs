fn main() -> anyhow::Result<()> {
    medley::runtime::run()
}
