fn main() {
    lexprompt::app::cli::run();
}
