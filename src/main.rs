/// Native entry point: classify one image from the command line.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    std::process::exit(pictag::native::run_cli());
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
