//! Unsafe file-type detection via magic numbers.

const UNSAFE_EXTENSIONS: &[&str] = &[
    "exe", "dll", "msi", "com", "scr", "bat", "cmd", "sh", "ps1", "vbs", "js",
];

/// Detect potentially unsafe file types (executables and scripts).
///
/// Checks well-known executable magic numbers first, then falls back to the
/// file extension for script formats that have no reliable signature.
pub fn is_unsafe_file(data: &[u8], filename: &str) -> bool {
    // PE/DOS executables: MZ
    if data.len() >= 2 && &data[0..2] == b"MZ" {
        return true;
    }

    // ELF: 7F 45 4C 46
    if data.len() >= 4 && &data[0..4] == b"\x7fELF" {
        return true;
    }

    // Mach-O, both endiannesses, 32/64-bit
    if data.len() >= 4 {
        let magic = [data[0], data[1], data[2], data[3]];
        if matches!(
            magic,
            [0xFE, 0xED, 0xFA, 0xCE]
                | [0xFE, 0xED, 0xFA, 0xCF]
                | [0xCE, 0xFA, 0xED, 0xFE]
                | [0xCF, 0xFA, 0xED, 0xFE]
        ) {
            return true;
        }
    }

    // Script shebang
    if data.starts_with(b"#!") {
        return true;
    }

    filename
        .rsplit('.')
        .next()
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            UNSAFE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pe_executable_blocked() {
        assert!(is_unsafe_file(b"MZ\x90\x00", "setup.bin"));
    }

    #[test]
    fn test_elf_blocked() {
        assert!(is_unsafe_file(b"\x7fELF\x02\x01", "tool"));
    }

    #[test]
    fn test_macho_blocked() {
        assert!(is_unsafe_file(&[0xCF, 0xFA, 0xED, 0xFE], "tool"));
    }

    #[test]
    fn test_shebang_script_blocked() {
        assert!(is_unsafe_file(b"#!/bin/bash\necho hi", "innocent.txt"));
    }

    #[test]
    fn test_unsafe_extension_blocked() {
        assert!(is_unsafe_file(b"echo hi", "run.BAT"));
        assert!(is_unsafe_file(b"", "payload.exe"));
    }

    #[test]
    fn test_ordinary_files_allowed() {
        assert!(!is_unsafe_file(b"%PDF-1.7", "report.pdf"));
        assert!(!is_unsafe_file(b"plain text", "notes.txt"));
        assert!(!is_unsafe_file(&[0x89, 0x50, 0x4E, 0x47], "pic.png"));
    }
}
