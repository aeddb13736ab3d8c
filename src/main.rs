use lexicon_reader::lexicon::utils::parse_encoding;
use lexicon_reader::{BookCategory, Features, ModuleDescriptor, RawLdBackend};
use std::env;

const USAGE: &str = "<data-path> [--datasize 2|4] [--category plain|devotional|greek|hebrew|strongs] \
[--encoding LABEL] [--cipher KEY] [--initials NAME] [KEY...]";

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} {}", args[0], USAGE);
        std::process::exit(1);
    }

    let data_path = &args[1];
    let mut datasize = 4usize;
    let mut descriptor = ModuleDescriptor::new(
        std::path::Path::new(data_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        data_path,
    );
    let mut lookups: Vec<&str> = Vec::new();

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        let mut value = |flag: &str| -> String {
            match rest.next() {
                Some(v) => v.clone(),
                None => {
                    eprintln!("ERROR: {} flag requires an argument.", flag);
                    std::process::exit(1);
                }
            }
        };
        match arg.as_str() {
            "--datasize" => {
                datasize = value("--datasize").parse().unwrap_or_else(|_| {
                    eprintln!("ERROR: --datasize expects 2 or 4.");
                    std::process::exit(1);
                })
            }
            "--category" => {
                descriptor = match value("--category").as_str() {
                    "plain" => descriptor,
                    "devotional" => descriptor.with_category(BookCategory::DailyDevotional),
                    "greek" => descriptor.with_features(Features::GREEK),
                    "hebrew" => descriptor.with_features(Features::HEBREW),
                    "strongs" => descriptor.with_features(Features::BOTH),
                    other => {
                        eprintln!("ERROR: Unknown category '{}'.", other);
                        std::process::exit(1);
                    }
                }
            }
            "--encoding" => descriptor = descriptor.with_encoding(parse_encoding(&value("--encoding"))),
            "--cipher" => descriptor = descriptor.with_cipher_key(value("--cipher")),
            "--initials" => descriptor = descriptor.with_initials(value("--initials")),
            key => lookups.push(key),
        }
    }

    println!("Reading raw lexicon: {}", data_path);
    println!("{}", "=".repeat(60));

    let backend = match RawLdBackend::new(descriptor, datasize) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("\nERROR: Failed to open module");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let cardinality = match backend.cardinality() {
        Ok(n) => n,
        Err(e) => {
            eprintln!("\nERROR: Failed to read index");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("\nModule Information:");
    println!("  Initials: {}", backend.descriptor().initials);
    println!("  Encoding: {}", backend.descriptor().encoding.name());
    println!("  Index record size: {} bytes", backend.layout().entry_size());
    println!("  Enciphered: {}", backend.descriptor().cipher_key.is_some());
    println!("  Total entries: {}", cardinality);

    println!("\nSample Keys (first 10):");
    for i in 0..cardinality.min(10) {
        match backend.get(i) {
            Ok(key) => println!("  {}. {}", i + 1, key),
            Err(e) => println!("  {}. <error: {}>", i + 1, e),
        }
    }
    if cardinality > 10 {
        println!("  ... and {} more", cardinality - 10);
    }

    for key in lookups {
        println!("\n{}", "-".repeat(60));
        match backend.get_raw_content(key) {
            Ok(text) => println!("{}:\n{}", key, text),
            Err(e) => match backend.index_of(key) {
                Ok(position) if position < 0 => {
                    println!("{}: {} (would sort at {})", key, e, -position - 1)
                }
                _ => println!("{}: {}", key, e),
            },
        }
    }
}
