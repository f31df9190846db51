use camino::Utf8PathBuf;
use uniffi_bindgen::bindings::SwiftBindingGenerator;

fn main() {
    let udl_file = Utf8PathBuf::from("src/pbn_quantizer.udl");
    let out_dir = Utf8PathBuf::from("bindings/generated");

    // Create output directory if needed
    std::fs::create_dir_all(&out_dir).unwrap();

    // Generate Swift bindings
    uniffi_bindgen::generate_bindings(
        &udl_file,
        None,
        SwiftBindingGenerator,
        Some(&out_dir),
        None,
        None,
        false,
    ).expect("Failed to generate Swift bindings");

    println!("Generated Swift bindings in bindings/generated");
    println!("   Files generated:");
    println!("   - pbn_quantizer.swift");
    println!("   - pbn_quantizerFFI.h");
    println!("   - pbn_quantizerFFI.modulemap");
}