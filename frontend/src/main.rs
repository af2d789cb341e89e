fn main() {
    parking_frontend::start();
}
