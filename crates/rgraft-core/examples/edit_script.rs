// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Example demonstrating parse, inspection, and structural editing.
//!
//! This example parses a small R script, shows lossless and canonical
//! reconstruction, and applies a few edits while the script keeps every
//! statement's positions consistent.

use rgraft_core::Script;

fn main() {
    println!("rgraft Script Editing Example\n");
    println!("=============================\n");

    let source = "threshold <- 0.05 # alpha\nmodel <- fit(data, method=\"lm\")\nsummary(model)\n";

    // Example 1: lossless round-trip
    println!("1. Lossless Round-Trip");
    let mut script = Script::parse(source).expect("valid R");
    println!("   Statements: {}", script.len());
    println!("   Reconstructed == original: {}", script.text() == source);
    println!();

    // Example 2: canonical text, formatting stripped
    println!("2. Canonical Text");
    println!("   {}", script.text_no_formatting());
    println!();

    // Example 3: update a function argument
    println!("3. Update `fit`'s first argument");
    let delta = script
        .update_function_argument("fit", 0, "cleaned", false, 0)
        .expect("edit applies");
    println!("   delta = {delta:+}");
    println!("   {}", script.text());

    // Example 4: add and remove parameters
    println!("4. Add `weights`, drop `method`");
    script
        .add_function_parameter("fit", Some("weights"), "w", 2, false)
        .expect("edit applies");
    script
        .remove_function_parameter("fit", "method")
        .expect("edit applies");
    println!("   {}", script.text());

    // Example 5: statement positions stay consistent
    println!("5. Statement map after edits");
    for statement in script.statements() {
        println!(
            "   [{:>3}..{:>3}] {}",
            statement.start_pos(),
            statement.end_pos(),
            statement.text_no_formatting()
        );
    }
}
