use dlopen_redirect::{parse_pairs, render_table, NEW_PATHS_ENV, OLD_PATHS_ENV};
use std::{
    env::{self, VarError},
    fs,
    path::PathBuf,
};

fn read_list(name: &str) -> String {
    println!("cargo:rerun-if-env-changed={name}");
    match env::var(name) {
        Ok(list) => list,
        Err(VarError::NotPresent) => String::new(),
        Err(err) => panic!("{name}: {err}"),
    }
}

fn main() {
    let old = read_list(OLD_PATHS_ENV);
    let new = read_list(NEW_PATHS_ENV);
    let pairs = parse_pairs(&old, &new).unwrap_or_else(|err| panic!("invalid redirect table: {err}"));
    if pairs.is_empty() {
        println!("cargo:warning=the redirect table is empty, dlopen calls will pass through unchanged");
    }
    let out = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out.join("redirects.rs"), render_table(&pairs)).expect("could not write redirects.rs");
}
