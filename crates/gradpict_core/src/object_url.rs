/// Public virtual-hosted URL for an object. The key is used verbatim.
pub fn public_object_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}
