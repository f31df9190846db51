fn main() {
    uniffi::generate_scaffolding("src/pbn_quantizer.udl").unwrap();
}
