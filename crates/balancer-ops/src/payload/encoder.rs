//! ABI encoding of calls from a static signature table and string arguments.

use alloy_dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier};
use alloy_json_abi::{Function, StateMutability};
use alloy_primitives::{hex, Bytes, Selector};
use indexmap::IndexMap;
use safe_multisig::{ContractInput, ContractMethod};

use crate::contracts;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Invalid function signature {signature:?}: {reason}")]
    InvalidSignature { signature: String, reason: String },
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    #[error("Function {name} takes {expected} argument(s), got {got}")]
    ArgumentCount { name: String, expected: String, got: usize },
    #[error("Invalid value {value:?} for argument `{param}` ({ty}): {reason}")]
    InvalidArgument { param: String, ty: String, value: String, reason: String },
    #[error("Call data is shorter than a selector")]
    ShortCallData,
    #[error("Unknown selector {0}")]
    UnknownSelector(Selector),
    #[error(transparent)]
    Abi(#[from] alloy_dyn_abi::Error),
}

/// Functions the encoder knows how to build and decode.
#[derive(Debug, Clone)]
pub struct AbiTable {
    functions: Vec<Function>,
}

/// Call data together with the fragment and arguments that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFunction {
    pub function: Function,
    pub args: Vec<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    pub function: Function,
    pub values: Vec<DynSolValue>,
}

impl AbiTable {
    pub fn parse<'a>(signatures: impl IntoIterator<Item = &'a str>) -> Result<Self, EncodeError> {
        let functions = signatures
            .into_iter()
            .map(|signature| {
                Function::parse(signature).map_err(|e| EncodeError::InvalidSignature {
                    signature: signature.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { functions })
    }

    /// Every contract the payload builders target.
    pub fn balancer() -> Result<Self, EncodeError> {
        Self::parse(contracts::all())
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Picks `name` by arity, so overloads such as `enableRecoveryMode()` and
    /// `enableRecoveryMode(address)` can live in one table.
    pub fn function(&self, name: &str, arity: usize) -> Result<&Function, EncodeError> {
        let overloads: Vec<&Function> = self.functions.iter().filter(|f| f.name == name).collect();

        if overloads.is_empty() {
            return Err(EncodeError::UnknownFunction(name.to_string()));
        }

        overloads.iter().find(|f| f.inputs.len() == arity).copied().ok_or_else(|| {
            EncodeError::ArgumentCount {
                name: name.to_string(),
                expected: overloads
                    .iter()
                    .map(|f| f.inputs.len().to_string())
                    .collect::<Vec<_>>()
                    .join(" or "),
                got: arity,
            }
        })
    }

    pub fn encode(&self, name: &str, args: &[String]) -> Result<EncodedFunction, EncodeError> {
        let function = self.function(name, args.len())?;
        let data = encode_function(function, args)?;

        Ok(EncodedFunction { function: function.clone(), args: args.to_vec(), data })
    }

    pub fn decode(&self, data: &[u8]) -> Result<DecodedCall, EncodeError> {
        if data.len() < 4 {
            return Err(EncodeError::ShortCallData);
        }

        let selector = Selector::from_slice(&data[..4]);
        let function = self
            .functions
            .iter()
            .find(|f| f.selector() == selector)
            .ok_or(EncodeError::UnknownSelector(selector))?;

        let values = function.abi_decode_input(&data[4..], true)?;

        Ok(DecodedCall { function: function.clone(), values })
    }
}

/// Coerces every string argument to the parameter's Solidity type and encodes
/// selector plus arguments.
pub fn encode_function(function: &Function, args: &[String]) -> Result<Bytes, EncodeError> {
    if function.inputs.len() != args.len() {
        return Err(EncodeError::ArgumentCount {
            name: function.name.clone(),
            expected: function.inputs.len().to_string(),
            got: args.len(),
        });
    }

    let values = function
        .inputs
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            let ty: DynSolType = param.resolve()?;
            ty.coerce_str(arg.trim()).map_err(|e| EncodeError::InvalidArgument {
                param: param.name.clone(),
                ty: param.ty.clone(),
                value: arg.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(function.abi_encode_input(&values)?.into())
}

impl EncodedFunction {
    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// The method fragment the Safe Transaction Builder shows next to a call.
    pub fn contract_method(&self) -> ContractMethod {
        ContractMethod {
            inputs: self
                .function
                .inputs
                .iter()
                .map(|param| ContractInput {
                    internal_type: param.ty.clone(),
                    name: param.name.clone(),
                    ty: param.ty.clone(),
                })
                .collect(),
            name: self.function.name.clone(),
            payable: self.function.state_mutability == StateMutability::Payable,
        }
    }

    pub fn inputs_values(&self) -> IndexMap<String, String> {
        self.function
            .inputs
            .iter()
            .zip(&self.args)
            .map(|(param, arg)| (param.name.clone(), arg.trim().to_string()))
            .collect()
    }
}

impl DecodedCall {
    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn signature(&self) -> String {
        self.function.signature()
    }

    pub fn value(&self, param: &str) -> Option<&DynSolValue> {
        self.function.inputs.iter().position(|p| p.name == param).and_then(|i| self.values.get(i))
    }

    /// Arguments rendered the way they are typed on the command line.
    pub fn args(&self) -> Vec<String> {
        self.values.iter().map(format_value).collect()
    }

    /// `name(arg, ...)` for display.
    pub fn display(&self) -> String {
        format!("{}({})", self.function.name, self.args().join(", "))
    }

    /// Whether this call is `name` applied to exactly `args`, compared as typed values.
    pub fn matches(&self, name: &str, args: &[String]) -> bool {
        if self.function.name != name || self.function.inputs.len() != args.len() {
            return false;
        }

        self.function.inputs.iter().zip(args).zip(&self.values).all(|((param, arg), value)| {
            let ty: Result<DynSolType, _> = param.resolve();
            ty.ok().and_then(|ty| ty.coerce_str(arg.trim()).ok()).as_ref() == Some(value)
        })
    }
}

pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(address) => address.to_checksum(None),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Function(function) => hex::encode_prefixed(function.as_slice()),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            format!("[{}]", values.iter().map(format_value).collect::<Vec<_>>().join(", "))
        }
        DynSolValue::Tuple(values) => {
            format!("({})", values.iter().map(format_value).collect::<Vec<_>>().join(", "))
        }
    }
}
