//! Stages `memory.x` for the linker and captures the build-host clock so
//! the firmware can seed its wall clock at boot.

use std::{
    env,
    fs::File,
    io::Write,
    path::PathBuf,
};

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    File::create(out.join("build_time.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "const BUILD_UTC_TIME: i64 = {};",
            chrono::Utc::now().timestamp()
        ))
        .unwrap();

    println!("cargo:rerun-if-changed=memory.x");
}
