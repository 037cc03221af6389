use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Root URL of the REST API serving /users and /posts.
    /// Falls back to POSTBOARD_API_BASE, then to JSONPlaceholder.
    #[clap(short = 'b', long, help = "API base URL")]
    base_url: Option<String>,

    /// File the rendered page is written to after every change.
    /// When omitted, pages are printed to stdout.
    #[clap(short = 'o', long, help = "HTML output file")]
    output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    base_url: Option<String>,
    output: Option<String>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            base_url: args.base_url,
            output: args.output,
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }
}
