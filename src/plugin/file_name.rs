/// last component of a `/` or `\` separated path
pub trait FileName {
    fn extract_file_name(&self) -> &str;
}

impl FileName for str {
    fn extract_file_name(&self) -> &str {
        match self.rfind(['/', '\\']) {
            Some(index) => &self[(index + 1)..],
            None => self,
        }
    }
}
