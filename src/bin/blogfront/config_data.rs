use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"[site]
name = "My Blog"

# Remote blog API. Set slug_lookup to false when the deployment has no
# /blogs/slug/{slug} endpoint
[api]
base_url = "https://blog.example.com/api"
slug_lookup = true
timeout_secs = 10

# Narrow viewports (below narrow_breakpoint px) get fewer page buttons
[pagination]
page_size = 6
wide_buttons = 7
narrow_buttons = 5
narrow_breakpoint = 768

[server]
address = "0.0.0.0"
port = 8001

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
# [log]
# level = "Info"
# log_to_console = true
# location = "${exe_dir}/log/server.log"
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}
