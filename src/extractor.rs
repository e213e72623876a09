use regex::Regex;

/// Pulls the radar frame paths out of the loop page's embedded script, e.g.
/// `theImageNames[0] = "/radar/IDR663.T.202405220000.png";`.
pub struct ImagePathExtractor {
    // Group 1 is the directory prefix, group 2 the frame filename.
    image_name_regex: Regex,
}

impl ImagePathExtractor {
    pub fn new() -> anyhow::Result<Self> {
        let image_name_regex =
            Regex::new(r#"theImageNames\[\d+\]\s*=\s*"(/radar/)([^"/\n]*\.png)""#)?;
        Ok(Self { image_name_regex })
    }

    /// Every frame path in the page, in the order the page declares them.
    /// Duplicates are kept.
    pub fn extract(&self, html: &str) -> Vec<String> {
        self.image_name_regex
            .captures_iter(html)
            .map(|caps| format!("{}{}", &caps[1], &caps[2]))
            .collect()
    }
}

/// Last segment of an image path, used as the on-disk frame name.
pub fn frame_file_name(image_path: &str) -> &str {
    image_path.rsplit('/').next().unwrap_or(image_path)
}
