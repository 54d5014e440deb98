use clap::Parser;

fn main() -> miette::Result<()> {
    rootme::App::parse().run()
}
