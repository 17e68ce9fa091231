fn main() -> anyhow::Result<()> {
    tilepool::run()
}
