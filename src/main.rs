fn main() {
    ash::cli::run();
}
