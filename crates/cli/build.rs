use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let crawl_args = [
        clap::arg!(<URL> "Root URL to start from"),
        clap::arg!(-d --depth <N> "Greatest link depth to follow").required(false),
        clap::arg!(--"follow-external" "Follow links that leave the root's domain"),
        clap::arg!(--jobs <N> "Number of concurrent fetches").default_value("8"),
        clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("10"),
        clap::arg!(-v --verbose "Report pages as they are visited"),
    ];

    let mut cmd = clap::Command::new("aranea")
        .version("1.0.0")
        .author("Aranea Contributors")
        .about("Map a website and mine pattern-matched data from its pages")
        .subcommand(
            clap::Command::new("map")
                .about("Build the map of pages reachable from a root URL")
                .args(crawl_args.clone())
                .arg(clap::arg!(--json "Write the map as a JSON object of url -> children"))
                .arg(clap::arg!(--copy "Mirror every fetched page under --path"))
                .arg(
                    clap::arg!(-p --path <DIR> "Directory that receives the mirrored pages")
                        .default_value(".")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            clap::Command::new("extract")
                .about("Map a site and extract pattern-matched text from its pages")
                .args(crawl_args)
                .arg(clap::arg!(--email "Extract email addresses"))
                .arg(clap::arg!(--phone "Extract phone numbers"))
                .arg(
                    clap::arg!(-r --regex <PATTERN> "Extract matches of the given regular expression")
                        .required(false),
                ),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "aranea", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "aranea", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "aranea", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "aranea", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
