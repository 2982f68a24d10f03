use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=SORTER_VERSION");
    let version =
        env::var("SORTER_VERSION").unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rustc-env=SORTER_VERSION={version}");
}
