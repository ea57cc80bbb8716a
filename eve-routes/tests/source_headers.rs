// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const HEADER: [&str; 3] = [
    "// This file is part of the product EVE Routes.",
    "// SPDX-FileCopyrightText: 2026 EVE Routes contributors",
    "// SPDX-License-Identifier: AGPL-3.0-or-later",
];

#[test]
fn every_rust_file_carries_the_project_header() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut checked = 0;

    for dir in ["src", "tests"] {
        for entry in WalkDir::new(root.join(dir)) {
            let entry = entry.expect("walk source tree");
            if entry.path().extension().and_then(|e| e.to_str()) != Some("rs") {
                continue;
            }
            let content = fs::read_to_string(entry.path()).expect("read source file");
            let head: Vec<&str> = content.lines().take(HEADER.len()).collect();
            assert_eq!(head, HEADER, "{}", entry.path().display());
            checked += 1;
        }
    }

    assert!(checked > 0);
}
