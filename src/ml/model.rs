// ============================================================
// Layer 5 — Pitch Classifier Model
// ============================================================
// A DistilBERT-shaped encoder with a sequence-classification
// head, laid out so a fine-tuned HuggingFace checkpoint maps
// onto it tensor for tensor (see infra/model_store.rs):
//
//   embeddings   word + position → LayerNorm → dropout
//   layers[i]    self-attention → add & norm (sa_layer_norm)
//                FFN lin1 → GELU → lin2 → add & norm (output_layer_norm)
//   head         hidden state of [CLS] → pre_classifier → ReLU
//                → dropout → classifier → logits
//
// Reference: Burn Book §3 (Building Blocks)
//            Sanh et al. 2019, "DistilBERT"

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{gelu, relu, softmax},
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct PitchClassifierConfig {
    pub vocab_size:              usize,
    pub max_position_embeddings: usize,
    pub dim:                     usize,
    pub n_heads:                 usize,
    pub n_layers:                usize,
    pub hidden_dim:              usize,
    pub num_labels:              usize,
    #[config(default = 0.0)]
    pub dropout:                 f64,
    #[config(default = 1e-12)]
    pub layer_norm_eps:          f64,
}

impl PitchClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> PitchClassifierModel<B> {
        let embeddings = Embeddings {
            word_embeddings:     EmbeddingConfig::new(self.vocab_size, self.dim).init(device),
            position_embeddings: EmbeddingConfig::new(self.max_position_embeddings, self.dim).init(device),
            layer_norm:          self.layer_norm(device),
            dropout:             DropoutConfig::new(self.dropout).init(),
        };
        let layers: Vec<TransformerBlock<B>> = (0..self.n_layers)
            .map(|_| self.build_transformer_block(device))
            .collect();
        let pre_classifier = LinearConfig::new(self.dim, self.dim).init(device);
        let classifier     = LinearConfig::new(self.dim, self.num_labels).init(device);
        let dropout        = DropoutConfig::new(self.dropout).init();
        PitchClassifierModel { embeddings, layers, pre_classifier, classifier, dropout }
    }

    fn layer_norm<B: Backend>(&self, device: &B::Device) -> LayerNorm<B> {
        LayerNormConfig::new(self.dim)
            .with_epsilon(self.layer_norm_eps)
            .init(device)
    }

    fn build_transformer_block<B: Backend>(&self, device: &B::Device) -> TransformerBlock<B> {
        let attention = MultiHeadAttentionConfig::new(self.dim, self.n_heads)
            .with_dropout(self.dropout)
            .init(device);
        let ffn = FeedForward {
            lin1:    LinearConfig::new(self.dim, self.hidden_dim).init(device),
            lin2:    LinearConfig::new(self.hidden_dim, self.dim).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
        };
        TransformerBlock {
            attention,
            sa_layer_norm:     self.layer_norm(device),
            ffn,
            output_layer_norm: self.layer_norm(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct Embeddings<B: Backend> {
    pub word_embeddings:     Embedding<B>,
    pub position_embeddings: Embedding<B>,
    pub layer_norm:          LayerNorm<B>,
    pub dropout:             Dropout,
}

impl<B: Backend> Embeddings<B> {
    /// input_ids: [batch, seq_len] → [batch, seq_len, dim]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = input_ids.dims();
        let words = self.word_embeddings.forward(input_ids);

        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &words.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let positions = self.position_embeddings.forward(positions);

        self.dropout.forward(self.layer_norm.forward(words + positions))
    }
}

#[derive(Module, Debug)]
pub struct FeedForward<B: Backend> {
    pub lin1:    Linear<B>,
    pub lin2:    Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> FeedForward<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        self.dropout.forward(self.lin2.forward(gelu(self.lin1.forward(x))))
    }
}

/// Post-norm encoder block.
#[derive(Module, Debug)]
pub struct TransformerBlock<B: Backend> {
    pub attention:         MultiHeadAttention<B>,
    pub sa_layer_norm:     LayerNorm<B>,
    pub ffn:               FeedForward<B>,
    pub output_layer_norm: LayerNorm<B>,
}

impl<B: Backend> TransformerBlock<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let attn_output = self.attention.forward(MhaInput::self_attn(x.clone())).context;
        let x = self.sa_layer_norm.forward(x + attn_output);
        let ffn_output = self.ffn.forward(x.clone());
        self.output_layer_norm.forward(x + ffn_output)
    }
}

/// Encoder plus a sequence-classification head on the first
/// ([CLS]) position.
#[derive(Module, Debug)]
pub struct PitchClassifierModel<B: Backend> {
    pub embeddings:     Embeddings<B>,
    pub layers:         Vec<TransformerBlock<B>>,
    pub pre_classifier: Linear<B>,
    pub classifier:     Linear<B>,
    pub dropout:        Dropout,
}

impl<B: Backend> PitchClassifierModel<B> {
    /// Number of rows in the word embedding table; every token id must be below it.
    pub fn vocab_size(&self) -> usize {
        self.embeddings.word_embeddings.weight.val().dims()[0]
    }

    /// Longest sequence the position table can embed.
    pub fn max_positions(&self) -> usize {
        self.embeddings.position_embeddings.weight.val().dims()[0]
    }

    /// input_ids: [batch, seq_len] → logits: [batch, num_labels]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let mut x = self.embeddings.forward(input_ids);
        for layer in &self.layers {
            x = layer.forward(x);
        }
        let [batch_size, _, dim] = x.dims();

        // Pool on the [CLS] token.
        let cls = x
            .slice([0..batch_size, 0..1, 0..dim])
            .reshape([batch_size, dim]);
        let pooled = relu(self.pre_classifier.forward(cls));
        self.classifier.forward(self.dropout.forward(pooled))
    }

    /// Softmax over the class dimension: [batch, num_labels]
    pub fn probabilities(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        softmax(self.forward(input_ids), 1)
    }
}
