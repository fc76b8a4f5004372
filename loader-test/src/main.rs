use libloading::os::unix::{Library, Symbol, RTLD_LAZY};
use std::process::exit;

const LIBRARY: &str = "./lib1.so";
const SYMBOL: &[u8] = b"hello_lib\0";

fn main() {
    let lib = match unsafe { Library::open(Some(LIBRARY), RTLD_LAZY) } {
        Ok(lib) => lib,
        Err(err) => {
            eprintln!("{err}");
            exit(1);
        }
    };

    let hello_lib: Symbol<unsafe extern "C" fn()> = match unsafe { lib.get(SYMBOL) } {
        Ok(sym) => sym,
        Err(err) => {
            eprintln!("{err}");
            // the handle is never closed on this path
            exit(1);
        }
    };
    unsafe { hello_lib() };
    drop(hello_lib);

    if let Err(err) = lib.close() {
        eprintln!("{err}");
        exit(1);
    }
}
