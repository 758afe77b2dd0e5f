//! Stamps each compilation with a build number and UTC timestamp,
//! surfaced at startup via `build_info`.

use std::fs;

fn main() {
    println!("cargo:rerun-if-changed=src");

    // Sequence number lives next to the manifest and survives clean builds.
    let counter_file = "build_number.txt";
    let build_number = fs::read_to_string(counter_file)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0)
        + 1;
    fs::write(counter_file, build_number.to_string()).expect("Failed to write build number file");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    println!("cargo:rustc-env=BEWELL_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=BEWELL_BUILD_TIMESTAMP={}", timestamp);
}
