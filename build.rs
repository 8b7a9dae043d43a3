use std::env;

fn main() {
    // Version string shared by the CLI and the C ABI
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=CO2_ESTIMATOR_VERSION={version}");

    // Set linking information for C libraries
    if env::var_os("CARGO_FEATURE_C_BINDINGS").is_some() {
        // Ensure we link against the C runtime
        println!("cargo:rustc-link-lib=c");

        // Set library search paths for pkg-config
        if let Ok(pkg_config_path) = env::var("PKG_CONFIG_PATH") {
            println!("cargo:rustc-env=PKG_CONFIG_PATH={}", pkg_config_path);
        }
    }

    println!("cargo:rerun-if-changed=src/");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
