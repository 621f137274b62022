use crate::error::ExtractError;
use crate::validate::is_valid_ip;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// One VM with its private address and, if the network section knows it, its access address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmAddresses {
    pub name: String,
    pub private_ip: String,
    pub network_ip: Option<String>,
}

impl Display for VmAddresses {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.network_ip {
            Some(net) => write!(f, "{} {}", self.private_ip, net),
            None => write!(f, "{}", self.private_ip),
        }
    }
}

/// Reads the JSON document at `path` and returns one output line per private IP entry.
pub fn extract<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ExtractError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExtractError::NotFound {
            path: path.to_path_buf(),
            source: e,
        },
        _ => ExtractError::Io(e),
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read input");
    parse_and_format(&text, path)
}

/// Same as [`extract`], on a document already held in memory.
pub fn extract_from_str(json: &str) -> Result<Vec<String>, ExtractError> {
    parse_and_format(json, Path::new("<input>"))
}

fn parse_and_format(json: &str, origin: &Path) -> Result<Vec<String>, ExtractError> {
    let doc: Value = serde_json::from_str(json).map_err(|source| ExtractError::Parse {
        path: PathBuf::from(origin),
        source,
    })?;
    Ok(merge(&doc)?.iter().map(ToString::to_string).collect())
}

/// Pairs every entry of `vm_private_ips.value` with its `network.vms` access address.
///
/// Entries come back in document order. The first invalid address aborts the
/// whole merge.
pub fn merge(doc: &Value) -> Result<Vec<VmAddresses>, ExtractError> {
    let private_ips = private_ips(doc)?;
    let network_ips = network_ips(doc)?;
    debug!(
        private = private_ips.map_or(0, Map::len),
        network = network_ips.len(),
        "merging address tables"
    );

    let mut merged = Vec::new();
    for (name, value) in private_ips.into_iter().flatten() {
        let private_ip = value.as_str().ok_or_else(|| {
            ExtractError::mismatch("string", format!("vm_private_ips.value.{}", name))
        })?;
        let network_ip = network_ips.get(name.as_str()).filter(|ip| !ip.is_empty());

        match network_ip {
            Some(&net) => {
                if !(is_valid_ip(private_ip) && is_valid_ip(net)) {
                    return Err(ExtractError::InvalidAddress {
                        private_ip: private_ip.to_owned(),
                        network_ip: Some(net.to_owned()),
                    });
                }
            }
            None => {
                if !is_valid_ip(private_ip) {
                    return Err(ExtractError::InvalidAddress {
                        private_ip: private_ip.to_owned(),
                        network_ip: None,
                    });
                }
            }
        }

        let vm = VmAddresses {
            name: name.clone(),
            private_ip: private_ip.to_owned(),
            network_ip: network_ip.map(|&net| net.to_owned()),
        };
        trace!(name = %vm.name, line = %vm, "merged");
        merged.push(vm);
    }
    Ok(merged)
}

// `vm_private_ips.value`, `None` when either key is absent.
fn private_ips(doc: &Value) -> Result<Option<&Map<String, Value>>, ExtractError> {
    let root = as_object(doc, "document")?;
    let section = match root.get("vm_private_ips") {
        Some(v) => as_object(v, "vm_private_ips")?,
        None => return Ok(None),
    };
    section
        .get("value")
        .map(|v| as_object(v, "vm_private_ips.value"))
        .transpose()
}

// name -> access_ip_v4 from `network.vms`; later records overwrite earlier ones.
fn network_ips(doc: &Value) -> Result<HashMap<&str, &str>, ExtractError> {
    let root = as_object(doc, "document")?;
    let section = match root.get("network") {
        Some(v) => as_object(v, "network")?,
        None => return Ok(HashMap::new()),
    };
    let vms = match section.get("vms") {
        Some(Value::Array(vms)) => vms,
        Some(_) => return Err(ExtractError::mismatch("array", "network.vms")),
        None => return Ok(HashMap::new()),
    };

    let mut ips = HashMap::with_capacity(vms.len());
    for (i, vm) in vms.iter().enumerate() {
        let at = format!("network.vms[{}]", i);
        let attributes = as_object(vm, &at)?
            .get("attributes")
            .ok_or_else(|| ExtractError::missing("attributes"))?;
        let attributes = as_object(attributes, &format!("{}.attributes", at))?;

        let name = attributes
            .get("name")
            .ok_or_else(|| ExtractError::missing("name"))?
            .as_str()
            .ok_or_else(|| ExtractError::mismatch("string", format!("{}.attributes.name", at)))?;
        let access_ip = match attributes.get("access_ip_v4") {
            Some(Value::String(ip)) => ip.as_str(),
            Some(Value::Null) => "",
            Some(_) => {
                return Err(ExtractError::mismatch(
                    "string",
                    format!("{}.attributes.access_ip_v4", at),
                ))
            }
            None => return Err(ExtractError::missing("access_ip_v4")),
        };
        ips.insert(name, access_ip);
    }
    Ok(ips)
}

fn as_object<'a>(
    value: &'a Value,
    location: &str,
) -> Result<&'a Map<String, Value>, ExtractError> {
    value
        .as_object()
        .ok_or_else(|| ExtractError::mismatch("object", location))
}
