use crate::error::{DeployError, Result};
use ethabi::{
    token::{LenientTokenizer, Tokenizer},
    Contract as ContractABI, ParamType, Token,
};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

const ABI_EXTENSION: &str = "abi";
const BIN_EXTENSION: &str = "bin";
const VERIFICATION_EXTENSION: &str = "json";

/// Build metadata directory laid out as `<Name>.abi`, `<Name>.bin` and `<Name>.json`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        ArtifactStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a deployable factory for `identifier`.
    /// Fails with `UnknownContract` when the build has no artifacts for it.
    pub fn get_factory(&self, identifier: &str) -> Result<ContractFactory> {
        let abi_path = self.artifact_path(identifier, ABI_EXTENSION)?;
        let bin_path = self.artifact_path(identifier, BIN_EXTENSION)?;
        if !abi_path.is_file() || !bin_path.is_file() {
            return Err(DeployError::UnknownContract(identifier.to_string()));
        }

        let abi = fs::read(&abi_path)?;
        let abi = ContractABI::load(&abi[..]).map_err(|e| DeployError::InvalidArtifact {
            contract: identifier.to_string(),
            reason: format!("Failed to load contract abi: {}", e),
        })?;
        let bin = fs::read_to_string(&bin_path)?;
        let bytecode = decode_bytecode(identifier, &bin)?;

        Ok(ContractFactory {
            identifier: identifier.to_string(),
            abi,
            bytecode,
        })
    }

    /// Compiler input needed by an explorer to reproduce the deployed bytecode.
    pub fn verification_source(&self, identifier: &str) -> Result<VerificationSource> {
        let path = self.artifact_path(identifier, VERIFICATION_EXTENSION)?;
        let content = fs::read(&path).map_err(|e| DeployError::InvalidArtifact {
            contract: identifier.to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })?;
        serde_json::from_slice(&content).map_err(|e| DeployError::InvalidArtifact {
            contract: identifier.to_string(),
            reason: format!("Failed to parse {}: {}", path.display(), e),
        })
    }

    fn artifact_path(&self, identifier: &str, extension: &str) -> Result<PathBuf> {
        if !is_contract_identifier(identifier) {
            return Err(DeployError::UnknownContract(identifier.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", identifier, extension)))
    }
}

fn is_contract_identifier(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn decode_bytecode(identifier: &str, bin: &str) -> Result<Vec<u8>> {
    let hex_str = bin.trim();
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytecode = hex::decode(hex_str).map_err(|e| DeployError::InvalidArtifact {
        contract: identifier.to_string(),
        reason: format!("Failed to decode bytecode: {}", e),
    })?;
    if bytecode.is_empty() {
        return Err(DeployError::InvalidArtifact {
            contract: identifier.to_string(),
            reason: "empty bytecode".to_string(),
        });
    }

    Ok(bytecode)
}

/// Creation payload of a contract together with the constructor argument encoding
/// it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDeployment {
    pub data: Vec<u8>,
    pub encoded_arguments: Vec<u8>,
}

/// Needed information to create a contract.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    identifier: String,
    abi: ContractABI,
    bytecode: Vec<u8>,
}

impl ContractFactory {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Declared constructor parameter types. A contract without a constructor takes none.
    pub fn constructor_inputs(&self) -> Vec<ParamType> {
        self.abi
            .constructor()
            .map(|c| c.inputs.iter().map(|p| p.kind.clone()).collect())
            .unwrap_or_default()
    }

    /// Tokenize `args` against the constructor signature.
    pub fn tokenize_arguments(&self, args: &[String]) -> Result<Vec<Token>> {
        let inputs = self.constructor_inputs();
        if inputs.len() != args.len() {
            return Err(DeployError::ArgumentMismatch {
                contract: self.identifier.clone(),
                reason: format!(
                    "constructor takes {} argument(s) but {} were given",
                    inputs.len(),
                    args.len()
                ),
            });
        }

        inputs
            .iter()
            .zip(args)
            .enumerate()
            .map(|(i, (kind, value))| {
                tokenize(kind, value).map_err(|e| DeployError::ArgumentMismatch {
                    contract: self.identifier.clone(),
                    reason: format!("argument {} ({:?}) is not a valid {}: {}", i, value, kind, e),
                })
            })
            .collect()
    }

    pub fn encode_deployment(&self, args: &[String]) -> Result<EncodedDeployment> {
        let tokens = self.tokenize_arguments(args)?;
        let encoded_arguments = ethabi::encode(&tokens);
        let data = [self.bytecode.as_slice(), encoded_arguments.as_slice()].concat();

        Ok(EncodedDeployment {
            data,
            encoded_arguments,
        })
    }
}

// The tokenizer expects bare hex for address and bytes types, also inside arrays.
fn tokenize(kind: &ParamType, value: &str) -> std::result::Result<Token, ethabi::Error> {
    let value = value.trim();
    if is_hex_kind(kind) {
        LenientTokenizer::tokenize(kind, value.strip_prefix("0x").unwrap_or(value))
    } else if holds_hex_elements(kind) {
        LenientTokenizer::tokenize(kind, &strip_element_prefixes(value))
    } else {
        LenientTokenizer::tokenize(kind, value)
    }
}

fn is_hex_kind(kind: &ParamType) -> bool {
    matches!(
        kind,
        ParamType::Address | ParamType::Bytes | ParamType::FixedBytes(_)
    )
}

fn holds_hex_elements(kind: &ParamType) -> bool {
    match kind {
        ParamType::Array(inner) | ParamType::FixedArray(inner, _) => {
            is_hex_kind(inner) || holds_hex_elements(inner)
        }
        _ => false,
    }
}

/// Drops a leading `0x` from every element of an array literal such as `[0xab,0xcd]`.
fn strip_element_prefixes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut element_start = true;
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if element_start && c == '0' && matches!(chars.peek(), Some('x') | Some('X')) {
            chars.next();
            element_start = false;
            continue;
        }
        match c {
            '[' | ',' => element_start = true,
            c if c.is_whitespace() => {}
            _ => element_start = false,
        }
        out.push(c);
    }
    out
}

/// Standard-JSON compiler input for an explorer's source verification.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VerificationSource {
    /// e.g. `v0.8.4+commit.c7e474f2`
    pub compiler_version: String,
    /// Fully qualified name, e.g. `contracts/BFTDollar.sol:BFTDollar`
    pub contract_name: String,
    pub source_code: serde_json::Value,
}

impl VerificationSource {
    pub fn source_code_string(&self) -> String {
        match &self.source_code {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
