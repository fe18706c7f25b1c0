//! CLI integration tests for speechcore-build.
//!
//! These tests drive the binary against temporary project trees, overriding
//! the platform and architecture so every platform's logic runs anywhere.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the speechcore-build binary command, isolated from the caller's
/// environment and global config.
fn speechcore_build(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("speechcore-build").unwrap();
    cmd.current_dir(root)
        .env("HOME", root)
        .env_remove("PYTHON_BUILD_TYPE")
        .env_remove("PYBIND11_INCLUDE");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

// ============================================================================
// speechcore-build detect
// ============================================================================

#[test]
fn test_detect_normalizes_aliases() {
    let tmp = temp_dir();

    speechcore_build(tmp.path())
        .args(["--platform", "darwin", "--arch", "aarch64", "detect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("platform: macos"))
        .stdout(predicate::str::contains("arch: arm64"))
        .stdout(predicate::str::contains("hint: none"));
}

#[test]
fn test_detect_unknown_values_fall_back_with_warning() {
    let tmp = temp_dir();

    speechcore_build(tmp.path())
        .args(["--platform", "beos", "--arch", "riscv64", "detect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("platform: windows"))
        .stdout(predicate::str::contains("arch: x86_64"))
        .stderr(predicate::str::contains("unknown platform"))
        .stderr(predicate::str::contains("unrecognized architecture"));
}

#[test]
fn test_detect_reads_hint_from_env() {
    let tmp = temp_dir();

    speechcore_build(tmp.path())
        .env("PYTHON_BUILD_TYPE", "debug")
        .args(["--platform", "linux", "detect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hint: debug"));
}

#[test]
fn test_detect_drops_invalid_hint() {
    let tmp = temp_dir();

    speechcore_build(tmp.path())
        .env("PYTHON_BUILD_TYPE", "minsizerel")
        .args(["--platform", "linux", "detect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hint: none"));
}

// ============================================================================
// speechcore-build resolve
// ============================================================================

#[test]
fn test_resolve_prefers_release() {
    let tmp = temp_dir();
    touch(tmp.path(), "lib/linux/x86_64/release/static/libSpeechCore.a");
    touch(tmp.path(), "lib/linux/x86_64/debug/static/libSpeechCore.a");

    speechcore_build(tmp.path())
        .args(["--platform", "linux", "--arch", "amd64", "resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("variant: release"))
        .stdout(predicate::str::contains("libSpeechCore.a"));
}

#[test]
fn test_resolve_honors_debug_hint() {
    let tmp = temp_dir();
    touch(tmp.path(), "lib/linux/x86_64/release/static/libSpeechCore.a");
    touch(tmp.path(), "lib/linux/x86_64/debug/static/libSpeechCore.a");

    speechcore_build(tmp.path())
        .args([
            "--platform",
            "linux",
            "--arch",
            "x86_64",
            "--build-type",
            "debug",
            "resolve",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("variant: debug"));
}

#[test]
fn test_resolve_missing_library_fails_with_target() {
    let tmp = temp_dir();

    speechcore_build(tmp.path())
        .args(["--platform", "linux", "--arch", "arm64", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "error[speechcore::resolve::library_not_found]: \
             could not find SpeechCore static library for platform linux, arch arm64",
        ))
        .stderr(predicate::str::contains("searched:"))
        .stderr(predicate::str::contains("Build the native library for this target"));
}

#[test]
fn test_resolve_missing_library_does_not_suggest_defer() {
    let tmp = temp_dir();

    speechcore_build(tmp.path())
        .args(["--platform", "linux", "--arch", "x86_64", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("searched:"))
        .stderr(predicate::str::contains("on-missing").not());
}

// ============================================================================
// speechcore-build flags / describe / command
// ============================================================================

#[test]
fn test_flags_linux() {
    let tmp = temp_dir();
    touch(tmp.path(), "lib/linux/x86_64/release/static/libSpeechCore.a");

    speechcore_build(tmp.path())
        .args(["--platform", "linux", "--arch", "x86_64", "flags"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-D__SPEECH_C_STATIC"))
        .stdout(predicate::str::contains("-std=c++2a"))
        .stdout(predicate::str::contains("-DLINUX"))
        .stdout(predicate::str::contains("-lSpeechCore"))
        .stdout(predicate::str::contains("lib/linux/x86_64/release/static"));
}

#[test]
fn test_flags_windows_crt_follows_hint() {
    let tmp = temp_dir();
    touch(tmp.path(), "lib/windows/x86_64/release/static/SpeechCore.lib");

    speechcore_build(tmp.path())
        .env("PYTHON_BUILD_TYPE", "debug")
        .args(["--platform", "win32", "--arch", "AMD64", "flags", "--compile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/MTd"))
        .stdout(predicate::str::contains("/std:c++20"))
        .stdout(predicate::str::contains("# Link flags").not());
}

#[test]
fn test_flags_windows_crt_follows_match_when_configured() {
    let tmp = temp_dir();
    touch(tmp.path(), "lib/windows/x86_64/release/static/SpeechCore.lib");
    touch(tmp.path(), ".speechcore/build.toml");
    fs::write(
        tmp.path().join(".speechcore/build.toml"),
        "[build]\ncrt-source = \"matched\"\n",
    )
    .unwrap();

    speechcore_build(tmp.path())
        .env("PYTHON_BUILD_TYPE", "debug")
        .args(["--platform", "win32", "--arch", "x86_64", "flags", "--compile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/MT\n"))
        .stdout(predicate::str::contains("/MTd").not());
}

#[test]
fn test_flags_missing_library_aborts() {
    let tmp = temp_dir();

    speechcore_build(tmp.path())
        .args(["--platform", "darwin", "--arch", "x86_64", "flags"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("platform macos, arch x86_64"))
        .stderr(predicate::str::contains("on-missing"));
}

#[test]
fn test_describe_deferred_missing_library() {
    let tmp = temp_dir();
    touch(tmp.path(), ".speechcore/build.toml");
    fs::write(
        tmp.path().join(".speechcore/build.toml"),
        "[build]\non-missing = \"defer\"\n",
    )
    .unwrap();

    let output = speechcore_build(tmp.path())
        .args(["--platform", "linux", "--arch", "x86_64", "describe"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["library_dirs"].as_array().unwrap().len(), 0);
    assert_eq!(json["libraries"][0], "SpeechCore");
    assert!(json["target"]["library"].is_null());
}

#[test]
fn test_describe_writes_file() {
    let tmp = temp_dir();
    touch(tmp.path(), "lib/macos/arm64/debug/static/libSpeechCore.a");

    speechcore_build(tmp.path())
        .args([
            "--platform",
            "darwin",
            "--arch",
            "arm64",
            "describe",
            "--output",
            "build/extension.json",
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(tmp.path().join("build/extension.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["name"], "speech_core.SpeechCore");
    assert_eq!(json["target"]["library"]["variant"], "debug");
    assert!(json["extra_link_args"]
        .as_array()
        .unwrap()
        .contains(&serde_json::Value::from("CoreFoundation")));
}

#[test]
fn test_command_renders_msvc_invocation() {
    let tmp = temp_dir();
    touch(tmp.path(), "lib/windows/x86/release/static/SpeechCore.lib");

    speechcore_build(tmp.path())
        .args(["--platform", "win32", "--arch", "i686", "command"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/LD"))
        .stdout(predicate::str::contains("/link"))
        .stdout(predicate::str::contains("SpeechCore.lib"))
        .stdout(predicate::str::contains("SpeechCore.pyd"));
}

// ============================================================================
// speechcore-build stage / clean / dist
// ============================================================================

#[test]
fn test_stage_then_clean_on_windows() {
    let tmp = temp_dir();
    touch(tmp.path(), "bin/x64/SpeechCore.dll");
    touch(tmp.path(), "speech_core/__init__.py");

    speechcore_build(tmp.path())
        .args(["--platform", "win32", "--arch", "x86_64", "stage"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Copied"));
    assert!(tmp.path().join("speech_core/SpeechCore.dll").exists());

    speechcore_build(tmp.path())
        .args(["--platform", "win32", "--arch", "x86_64", "clean"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));
    assert!(!tmp.path().join("speech_core/SpeechCore.dll").exists());
    assert!(tmp.path().join("speech_core/__init__.py").exists());
}

#[test]
fn test_stage_dry_run() {
    let tmp = temp_dir();
    touch(tmp.path(), "bin/x64/SpeechCore.dll");

    speechcore_build(tmp.path())
        .args(["--platform", "win32", "--arch", "x86_64", "stage", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Would copy"));
    assert!(!tmp.path().join("speech_core").exists());
}

#[test]
fn test_stage_is_noop_on_linux() {
    let tmp = temp_dir();
    touch(tmp.path(), "bin/x64/SpeechCore.dll");

    speechcore_build(tmp.path())
        .args(["--platform", "linux", "--arch", "x86_64", "stage"])
        .assert()
        .success();
    assert!(!tmp.path().join("speech_core/SpeechCore.dll").exists());
}

#[cfg(unix)]
#[test]
fn test_dist_wheel_cleans_after_backend() {
    let tmp = temp_dir();
    touch(tmp.path(), "speech_core/SpeechCore.dll");

    speechcore_build(tmp.path())
        .args([
            "--platform",
            "win32",
            "--arch",
            "x86_64",
            "dist",
            "wheel",
            "--",
            "test",
            "-f",
            "speech_core/SpeechCore.dll",
        ])
        .assert()
        .success();
    assert!(!tmp.path().join("speech_core/SpeechCore.dll").exists());
}

#[cfg(unix)]
#[test]
fn test_dist_failed_backend_keeps_dlls() {
    let tmp = temp_dir();
    touch(tmp.path(), "speech_core/SpeechCore.dll");

    speechcore_build(tmp.path())
        .args([
            "--platform",
            "win32",
            "--arch",
            "x86_64",
            "dist",
            "wheel",
            "--",
            "false",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed with exit code"));
    assert!(tmp.path().join("speech_core/SpeechCore.dll").exists());
}

#[test]
fn test_dist_dry_run_skips_backend_and_staging() {
    let tmp = temp_dir();
    touch(tmp.path(), "bin/x64/SpeechCore.dll");

    speechcore_build(tmp.path())
        .args([
            "--platform",
            "win32",
            "--arch",
            "x86_64",
            "dist",
            "sdist",
            "--dry-run",
            "--",
            "false",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Would copy"))
        .stderr(predicate::str::contains("Would run backend: false"));
    assert!(!tmp.path().join("speech_core/SpeechCore.dll").exists());
}

// ============================================================================
// speechcore-build completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();

    speechcore_build(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("speechcore-build"));
}
