fn main() {
    carrier_owl::app::cli::run();
}
