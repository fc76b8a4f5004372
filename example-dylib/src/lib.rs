//!An example dynamically loadable library.
//!
//! This crate creates a dynamic library that the loader test harness opens as `./lib1.so`.

#[no_mangle]
pub extern "C" fn hello_lib() {
    println!("Hello from the example library!");
}
