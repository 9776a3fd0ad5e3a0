//! Methods command implementation.

use paraty_methods::available_methods;

/// List the available ceiling-price methodologies.
pub(crate) fn run() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Valuation Methodologies                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for info in available_methods() {
        println!("{}", info.name);
        println!("  {}", info.description);
        println!("  requires: {}", info.requires.join(", "));
        if info.requires_sector_reference {
            println!("  needs subsector reference values");
        }
        println!();
    }
}
