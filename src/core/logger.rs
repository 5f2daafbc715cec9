// Test binaries install a logging backend before any test runs, so
// RUST_LOG can surface the decode trace output.

#[cfg(test)]
#[ctor::ctor]
fn mod_test_setup() {
    env_logger::init();
}
